use super::{Attribute, AttributeField, EntityMetadata, TypeKey};
use crate::Result;

use std::{any::Any, fmt::Debug};

/// Field-level access to a mapped object.
///
/// This is the dynamic side of a mapped type. The converter reads and writes
/// fields through it by name, without knowing the concrete type. Usually
/// implemented by `#[derive(Model)]`.
pub trait Model: Any + Debug + Send + Sync {
    /// Key of the concrete type behind the trait object.
    fn type_key(&self) -> TypeKey;

    /// Reads a field. Returns `None` for a name the type does not declare.
    fn get(&self, field: &str) -> Option<Attribute>;

    /// Writes a field. Fails with `field_not_found` for an undeclared name,
    /// or a conversion error when the attribute does not fit the field.
    fn set(&mut self, field: &str, value: Attribute) -> Result<()>;

    fn clone_model(&self) -> Box<dyn Model>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// The static side of a mapped type: how to describe it to a registry.
pub trait Mapped: Model + AttributeField + Clone {
    fn metadata() -> EntityMetadata;
}

impl dyn Model {
    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Recovers the concrete type, handing the box back on mismatch.
    pub fn downcast<T: Model>(self: Box<Self>) -> std::result::Result<Box<T>, Box<dyn Model>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(model) => Ok(model),
                Err(_) => unreachable!("type checked above"),
            }
        } else {
            Err(self)
        }
    }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}
