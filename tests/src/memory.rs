use crate::{eval, ExecLog, Op};

use semimap::{
    driver::{Capability, Driver},
    stmt::{
        CommunicationEntity, CursoredPage, DeleteQuery, EntityStream, PageRequest, SelectQuery,
        UpdateQuery, Value,
    },
    Error, Result,
};

use async_trait::async_trait;
use indexmap::IndexMap;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// An in-memory document store.
///
/// Entities are kept per storage name in insertion order. Every call is
/// recorded in an [`ExecLog`].
#[derive(Debug, Clone)]
pub struct MemoryDriver {
    capability: &'static Capability,
    collections: Arc<Mutex<IndexMap<String, Vec<CommunicationEntity>>>>,
    failure: Arc<Mutex<Option<Error>>>,
    log: ExecLog,
}

/// Evaluates every function and supports time-to-live.
pub const MEMORY: Capability = Capability {
    database: "memory",
    functions: Capability::ALL_FUNCTIONS,
    ttl: true,
};

/// Evaluates no functions and has no time-to-live.
pub const PLAIN: Capability = Capability {
    database: "plain",
    functions: &[],
    ttl: false,
};

impl MemoryDriver {
    pub fn new() -> Self {
        Self::with_capability(&MEMORY)
    }

    pub fn with_capability(capability: &'static Capability) -> Self {
        Self {
            capability,
            collections: Arc::default(),
            failure: Arc::default(),
            log: ExecLog::default(),
        }
    }

    pub fn log(&self) -> &ExecLog {
        &self.log
    }

    /// Makes the next call fail with `err` instead of touching the store.
    /// The call is still logged.
    pub fn fail_next(&self, err: Error) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn take_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Stores entities directly, bypassing the log.
    pub fn seed(&self, entities: impl IntoIterator<Item = CommunicationEntity>) {
        let mut collections = self.collections.lock().unwrap();

        for entity in entities {
            collections
                .entry(entity.name().to_string())
                .or_default()
                .push(entity);
        }
    }

    /// Every stored entity under `name`, in insertion order.
    pub fn stored(&self, name: &str) -> Vec<CommunicationEntity> {
        self.collections
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    fn query(&self, query: &SelectQuery) -> Vec<CommunicationEntity> {
        let mut entities: Vec<_> = self
            .stored(&query.name)
            .into_iter()
            .filter(|entity| {
                query
                    .condition
                    .as_ref()
                    .map_or(true, |condition| eval::matches(entity, condition))
            })
            .collect();

        entities.sort_by(|a, b| eval::order(a, b, &query.sorts));

        let limit = match query.limit {
            0 => usize::MAX,
            limit => limit as usize,
        };

        entities
            .into_iter()
            .skip(query.skip as usize)
            .take(limit)
            .map(|mut entity| {
                entity.project(&query.columns);
                entity
            })
            .collect()
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn id_of(entity: &CommunicationEntity) -> Option<&Value> {
    entity.find_value("_id").filter(|id| !id.is_null())
}

#[async_trait]
impl Driver for MemoryDriver {
    fn capability(&self) -> &Capability {
        self.capability
    }

    async fn insert(
        &self,
        entity: CommunicationEntity,
        ttl: Option<Duration>,
    ) -> Result<CommunicationEntity> {
        self.log.push(Op::Insert {
            entity: entity.clone(),
            ttl,
        });
        self.take_failure()?;

        let mut collections = self.collections.lock().unwrap();
        let collection = collections.entry(entity.name().to_string()).or_default();

        if let Some(id) = id_of(&entity) {
            if collection.iter().any(|stored| id_of(stored) == Some(id)) {
                return Err(Error::from_args(format_args!(
                    "duplicate id {id} in `{}`",
                    entity.name()
                )));
            }
        }

        collection.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: CommunicationEntity) -> Result<CommunicationEntity> {
        self.log.push(Op::Update(entity.clone()));
        self.take_failure()?;

        let mut collections = self.collections.lock().unwrap();
        let collection = collections.entry(entity.name().to_string()).or_default();

        let Some(id) = id_of(&entity) else {
            return Err(Error::id_not_found(entity.name()));
        };

        match collection.iter_mut().find(|stored| id_of(stored) == Some(id)) {
            Some(stored) => *stored = entity.clone(),
            None => collection.push(entity.clone()),
        }

        Ok(entity)
    }

    async fn update_where(&self, query: UpdateQuery) -> Result<u64> {
        self.log.push(Op::UpdateWhere(query.clone()));
        self.take_failure()?;

        let mut collections = self.collections.lock().unwrap();
        let Some(collection) = collections.get_mut(&query.name) else {
            return Ok(0);
        };

        let mut count = 0;

        for entity in collection.iter_mut() {
            if query
                .condition
                .as_ref()
                .map_or(true, |condition| eval::matches(entity, condition))
            {
                for element in &query.set {
                    entity.set(element.clone());
                }

                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete(&self, query: DeleteQuery) -> Result<()> {
        self.log.push(Op::Delete(query.clone()));
        self.take_failure()?;

        let mut collections = self.collections.lock().unwrap();
        let Some(collection) = collections.get_mut(&query.name) else {
            return Ok(());
        };

        let matched = |entity: &CommunicationEntity| {
            query
                .condition
                .as_ref()
                .map_or(true, |condition| eval::matches(entity, condition))
        };

        if query.columns.is_empty() {
            collection.retain(|entity| !matched(entity));
        } else {
            for entity in collection.iter_mut().filter(|entity| matched(entity)) {
                for column in &query.columns {
                    entity.remove(column);
                }
            }
        }

        Ok(())
    }

    async fn select(&self, query: SelectQuery) -> Result<EntityStream> {
        self.log.push(Op::Select(query.clone()));
        self.take_failure()?;
        Ok(EntityStream::from_vec(self.query(&query)))
    }

    async fn count(&self, query: SelectQuery) -> Result<u64> {
        self.log.push(Op::Count(query.clone()));
        self.take_failure()?;

        let query = SelectQuery {
            skip: 0,
            limit: 0,
            ..query
        };

        Ok(self.query(&query).len() as u64)
    }

    async fn select_cursor(
        &self,
        query: SelectQuery,
        request: PageRequest,
    ) -> Result<CursoredPage> {
        self.log.push(Op::SelectCursor(query.clone(), request.clone()));
        self.take_failure()?;

        // The trait's keyset paging, without logging the inner select
        let inner = Inner(MemoryDriver {
            log: ExecLog::default(),
            ..self.clone()
        });

        Driver::select_cursor(&inner, query, request).await
    }
}

/// The store without the overridden cursor paging, so the trait default runs.
#[derive(Debug)]
struct Inner(MemoryDriver);

#[async_trait]
impl Driver for Inner {
    fn capability(&self) -> &Capability {
        self.0.capability
    }

    async fn insert(
        &self,
        entity: CommunicationEntity,
        ttl: Option<Duration>,
    ) -> Result<CommunicationEntity> {
        self.0.insert(entity, ttl).await
    }

    async fn update(&self, entity: CommunicationEntity) -> Result<CommunicationEntity> {
        self.0.update(entity).await
    }

    async fn update_where(&self, query: UpdateQuery) -> Result<u64> {
        self.0.update_where(query).await
    }

    async fn delete(&self, query: DeleteQuery) -> Result<()> {
        self.0.delete(query).await
    }

    async fn select(&self, query: SelectQuery) -> Result<EntityStream> {
        self.0.select(query).await
    }
}
