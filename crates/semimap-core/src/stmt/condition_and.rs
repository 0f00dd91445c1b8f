use super::CriteriaCondition;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionAnd {
    pub operands: Vec<CriteriaCondition>,
}

impl CriteriaCondition {
    /// Combines two conditions with `AND`, flattening nested `AND` operands
    /// while keeping build order.
    pub fn and(self, rhs: impl Into<Self>) -> Self {
        let mut lhs = self;
        let rhs = rhs.into();

        match (&mut lhs, rhs) {
            (Self::And(lhs_and), Self::And(rhs_and)) => {
                lhs_and.operands.extend(rhs_and.operands);
                lhs
            }
            (Self::And(lhs_and), rhs) => {
                lhs_and.operands.push(rhs);
                lhs
            }
            (_, Self::And(mut rhs_and)) => {
                rhs_and.operands.insert(0, lhs);
                rhs_and.into()
            }
            (_, rhs) => ConditionAnd {
                operands: vec![lhs, rhs],
            }
            .into(),
        }
    }

    /// Returns `None` for an empty list and the operand itself when there is
    /// only one.
    pub fn and_from_vec(operands: Vec<Self>) -> Option<Self> {
        let mut operands = operands.into_iter();
        let first = operands.next()?;
        Some(operands.fold(first, |acc, c| acc.and(c)))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Self::And(_))
    }
}

impl ops::Deref for ConditionAnd {
    type Target = [CriteriaCondition];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl<'a> IntoIterator for &'a ConditionAnd {
    type IntoIter = std::slice::Iter<'a, CriteriaCondition>;
    type Item = &'a CriteriaCondition;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

impl From<ConditionAnd> for CriteriaCondition {
    fn from(value: ConditionAnd) -> Self {
        Self::And(value)
    }
}
