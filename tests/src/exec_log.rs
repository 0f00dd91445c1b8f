use semimap::stmt::{CommunicationEntity, DeleteQuery, PageRequest, SelectQuery, UpdateQuery};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// One operation received by the [`MemoryDriver`](crate::MemoryDriver).
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Insert {
        entity: CommunicationEntity,
        ttl: Option<Duration>,
    },
    Update(CommunicationEntity),
    UpdateWhere(UpdateQuery),
    Delete(DeleteQuery),
    Select(SelectQuery),
    Count(SelectQuery),
    SelectCursor(SelectQuery, PageRequest),
}

/// A handle on the operations log shared with a driver
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Op>>>,
}

impl ExecLog {
    pub(crate) fn push(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// A copy of every logged operation, oldest first
    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    /// The most recent operation, if any
    pub fn last(&self) -> Option<Op> {
        self.ops.lock().unwrap().last().cloned()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Op) -> bool,
    {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    /// The last select sent to the driver
    pub fn last_select(&self) -> Option<SelectQuery> {
        self.ops.lock().unwrap().iter().rev().find_map(|op| match op {
            Op::Select(query) | Op::Count(query) | Op::SelectCursor(query, _) => {
                Some(query.clone())
            }
            _ => None,
        })
    }

    /// The last delete sent to the driver
    pub fn last_delete(&self) -> Option<DeleteQuery> {
        self.ops.lock().unwrap().iter().rev().find_map(|op| match op {
            Op::Delete(query) => Some(query.clone()),
            _ => None,
        })
    }

    /// The last conditional update sent to the driver
    pub fn last_update(&self) -> Option<UpdateQuery> {
        self.ops.lock().unwrap().iter().rev().find_map(|op| match op {
            Op::UpdateWhere(query) => Some(query.clone()),
            _ => None,
        })
    }

    /// Entities inserted, oldest first
    pub fn inserted(&self) -> Vec<CommunicationEntity> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op {
                Op::Insert { entity, .. } => Some(entity.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear the log
    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }
}
