use super::{ConditionAnd, ConditionCompare, ConditionNot, ConditionOr};

use std::fmt;

/// A node in a query's boolean condition tree.
///
/// Leaves compare one element against a value. `And` and `Or` hold two or
/// more operands in build order, and `Not` wraps exactly one condition.
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaCondition {
    /// Compares a named element against a value
    Compare(ConditionCompare),

    /// All operands must hold
    And(ConditionAnd),

    /// At least one operand must hold
    Or(ConditionOr),

    /// Negates the inner condition
    Not(ConditionNot),
}

impl CriteriaCondition {
    pub fn is_compare(&self) -> bool {
        matches!(self, Self::Compare(_))
    }

    pub fn as_compare(&self) -> Option<&ConditionCompare> {
        match self {
            Self::Compare(compare) => Some(compare),
            _ => None,
        }
    }

    /// Combines `self` with `other` using `AND` when `and` is `true`, `OR`
    /// otherwise.
    pub fn combine(self, other: Self, and: bool) -> Self {
        if and {
            Self::and(self, other)
        } else {
            Self::or(self, other)
        }
    }

    /// Calls `f` on every leaf, in tree order.
    pub fn for_each_compare(&self, f: &mut impl FnMut(&ConditionCompare)) {
        match self {
            Self::Compare(compare) => f(compare),
            Self::And(and) => and.operands.iter().for_each(|c| c.for_each_compare(f)),
            Self::Or(or) => or.operands.iter().for_each(|c| c.for_each_compare(f)),
            Self::Not(not) => not.condition.for_each_compare(f),
        }
    }
}

impl fmt::Display for CriteriaCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, operands: &[CriteriaCondition], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {sep} ")?;
                }
                operand.fmt(f)?;
            }
            f.write_str(")")
        }

        match self {
            Self::Compare(compare) => compare.fmt(f),
            Self::And(and) => join(f, &and.operands, "AND"),
            Self::Or(or) => join(f, &or.operands, "OR"),
            Self::Not(not) => write!(f, "NOT {}", not.condition),
        }
    }
}
