use super::{CriteriaCondition, Element};

/// A storage-agnostic update: assigns `set` on every entity matching
/// `condition`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateQuery {
    pub name: String,

    /// Assignments, in declaration order
    pub set: Vec<Element>,

    pub condition: Option<CriteriaCondition>,
}

impl UpdateQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set(mut self, element: Element) -> Self {
        self.set.push(element);
        self
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
