use super::Value;

use indexmap::IndexMap;
use std::fmt;

/// A placeholder in a parsed statement, bound to a value before execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Param {
    /// `?N`, 1-based
    Positional(usize),

    /// `:name`
    Named(String),
}

impl Param {
    pub fn positional(position: usize) -> Self {
        Self::Positional(position)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Positional(_))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(position) => write!(f, "?{position}"),
            Self::Named(name) => write!(f, ":{name}"),
        }
    }
}

/// Values supplied for a statement's placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    positional: IndexMap<usize, Value>,
    named: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `?position`.
    pub fn bind(&mut self, position: usize, value: impl Into<Value>) -> &mut Self {
        self.positional.insert(position, value.into());
        self
    }

    /// Binds `:name`.
    pub fn bind_named(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, param: &Param) -> Option<&Value> {
        match param {
            Param::Positional(position) => self.positional.get(position),
            Param::Named(name) => self.named.get(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}
