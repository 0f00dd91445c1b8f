use super::Value;
use crate::Result;

/// A named value inside a [`CommunicationEntity`](super::CommunicationEntity)
/// or a query condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Storage-side column name
    pub name: String,

    /// Value held under the name
    pub value: Value,
}

impl Element {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Reads the value as `T`, coercing it when the stored width differs.
    pub fn value_as<T>(&self) -> Result<T>
    where
        T: TryFrom<Value, Error = crate::Error>,
    {
        T::try_from(self.value.clone())
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}
