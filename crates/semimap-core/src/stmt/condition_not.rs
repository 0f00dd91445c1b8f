use super::CriteriaCondition;

/// Negates exactly one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNot {
    pub condition: Box<CriteriaCondition>,
}

impl CriteriaCondition {
    /// Wraps the condition in `NOT`.
    pub fn not(condition: impl Into<Self>) -> Self {
        ConditionNot {
            condition: Box::new(condition.into()),
        }
        .into()
    }

    /// Negates the condition, unwrapping a double negation.
    pub fn negate(self) -> Self {
        match self {
            Self::Not(not) => *not.condition,
            condition => Self::not(condition),
        }
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not(_))
    }
}

impl From<ConditionNot> for CriteriaCondition {
    fn from(value: ConditionNot) -> Self {
        Self::Not(value)
    }
}
