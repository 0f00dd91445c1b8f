use super::{Attribute, FieldMetadata, Model};
use crate::Result;

use std::fmt;

/// Builds an immutable object from its constructor arguments, in declared
/// parameter order.
pub type InstanceBuilder = fn(Vec<Attribute>) -> Result<Box<dyn Model>>;

/// Positional construction of record-like types.
#[derive(Clone)]
pub struct ConstructorMetadata {
    /// Parameters, in declared order
    pub parameters: Vec<FieldMetadata>,

    pub build: InstanceBuilder,
}

impl ConstructorMetadata {
    pub fn new(parameters: Vec<FieldMetadata>, build: InstanceBuilder) -> Self {
        Self { parameters, build }
    }
}

impl fmt::Debug for ConstructorMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorMetadata")
            .field("parameters", &self.parameters)
            .finish()
    }
}
