use super::{CriteriaCondition, Element, Operator, Value};
use crate::{Error, Result};

use std::fmt;

/// Leaf condition: `element.name <op> element.value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionCompare {
    pub op: Operator,
    pub element: Element,
}

impl CriteriaCondition {
    pub fn compare(op: Operator, element: Element) -> Self {
        ConditionCompare { op, element }.into()
    }

    pub fn eq(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::Equals, Element::new(name, value))
    }

    pub fn gt(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::GreaterThan, Element::new(name, value))
    }

    pub fn gte(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::GreaterEquals, Element::new(name, value))
    }

    pub fn lt(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::LesserThan, Element::new(name, value))
    }

    pub fn lte(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::LesserEquals, Element::new(name, value))
    }

    pub fn like(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::Like, Element::new(name, value))
    }

    pub fn contains(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::Contains, Element::new(name, value))
    }

    pub fn starts_with(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::StartsWith, Element::new(name, value))
    }

    pub fn ends_with(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(Operator::EndsWith, Element::new(name, value))
    }

    /// `name BETWEEN [low, high]`, both bounds inclusive.
    pub fn between(
        name: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::compare(
            Operator::Between,
            Element::new(name, Value::List(vec![low.into(), high.into()])),
        )
    }

    /// `name IN [values]`. The list must not be empty.
    pub fn in_list<V: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let name = name.into();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if values.is_empty() {
            return Err(Error::illegal_argument(format!(
                "`IN` on `{name}` requires at least one value"
            )));
        }

        Ok(Self::compare(
            Operator::In,
            Element::new(name, Value::List(values)),
        ))
    }
}

impl fmt::Display for ConditionCompare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.element.name, self.op, self.element.value)
    }
}

impl From<ConditionCompare> for CriteriaCondition {
    fn from(value: ConditionCompare) -> Self {
        Self::Compare(value)
    }
}
