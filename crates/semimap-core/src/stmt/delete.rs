use super::CriteriaCondition;

/// A storage-agnostic delete. Without a condition every entity under `name`
/// is removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteQuery {
    pub name: String,

    pub condition: Option<CriteriaCondition>,

    /// Columns to remove instead of the whole entity, when the store
    /// supports it
    pub columns: Vec<String>,
}

impl DeleteQuery {
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

    pub fn and(&mut self, condition: CriteriaCondition) {
        self.condition = Some(match self.condition.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
    }
}
