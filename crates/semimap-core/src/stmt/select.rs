use super::{CriteriaCondition, Sort};

/// A storage-agnostic read.
///
/// `skip` and `limit` of zero mean no offset and no bound. Sorts apply in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    /// Entity (collection, table) name
    pub name: String,

    pub condition: Option<CriteriaCondition>,

    pub sorts: Vec<Sort>,

    pub skip: u64,

    pub limit: u64,

    /// Projected columns. Empty selects every column.
    pub columns: Vec<String>,

    /// The statement counts matches instead of returning them
    pub count: bool,
}

impl SelectQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn filter(mut self, condition: CriteriaCondition) -> Self {
        self.and(condition);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// ANDs `condition` with the existing condition, if any.
    pub fn and(&mut self, condition: CriteriaCondition) {
        self.condition = Some(match self.condition.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
    }
}
