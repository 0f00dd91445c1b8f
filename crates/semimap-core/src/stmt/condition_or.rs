use super::CriteriaCondition;

use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionOr {
    pub operands: Vec<CriteriaCondition>,
}

impl CriteriaCondition {
    /// Combines two conditions with `OR`, flattening nested `OR` operands
    /// while keeping build order.
    pub fn or(self, rhs: impl Into<Self>) -> Self {
        let mut lhs = self;
        let rhs = rhs.into();

        match (&mut lhs, rhs) {
            (Self::Or(lhs_or), Self::Or(rhs_or)) => {
                lhs_or.operands.extend(rhs_or.operands);
                lhs
            }
            (Self::Or(lhs_or), rhs) => {
                lhs_or.operands.push(rhs);
                lhs
            }
            (_, Self::Or(mut rhs_or)) => {
                rhs_or.operands.insert(0, lhs);
                rhs_or.into()
            }
            (_, rhs) => ConditionOr {
                operands: vec![lhs, rhs],
            }
            .into(),
        }
    }

    pub fn or_from_vec(operands: Vec<Self>) -> Option<Self> {
        let mut operands = operands.into_iter();
        let first = operands.next()?;
        Some(operands.fold(first, |acc, c| acc.or(c)))
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Self::Or(_))
    }
}

impl ops::Deref for ConditionOr {
    type Target = [CriteriaCondition];

    fn deref(&self) -> &Self::Target {
        self.operands.deref()
    }
}

impl<'a> IntoIterator for &'a ConditionOr {
    type IntoIter = std::slice::Iter<'a, CriteriaCondition>;
    type Item = &'a CriteriaCondition;

    fn into_iter(self) -> Self::IntoIter {
        self.operands.iter()
    }
}

impl From<ConditionOr> for CriteriaCondition {
    fn from(value: ConditionOr) -> Self {
        Self::Or(value)
    }
}
