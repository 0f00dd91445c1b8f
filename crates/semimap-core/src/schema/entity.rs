use super::{
    ConstructorMetadata, FieldMetadata, InheritanceMetadata, InstanceBuilder, Model, TypeKey,
};
use crate::{Error, Result};

use std::fmt;

/// Describes how a mapped type is stored.
#[derive(Clone)]
pub struct EntityMetadata {
    key: TypeKey,
    name: String,
    fields: Vec<FieldMetadata>,
    inheritance: Option<InheritanceMetadata>,
    constructor: Option<ConstructorMetadata>,
    instance: Option<fn() -> Box<dyn Model>>,
    embeddable: bool,
}

#[derive(Debug)]
pub struct EntityMetadataBuilder {
    metadata: EntityMetadata,
}

impl EntityMetadata {
    /// Starts describing `T`, stored under `name`.
    pub fn builder<T: Model>(name: impl Into<String>) -> EntityMetadataBuilder {
        EntityMetadataBuilder {
            metadata: EntityMetadata {
                key: TypeKey::of::<T>(),
                name: name.into(),
                fields: vec![],
                inheritance: None,
                constructor: None,
                instance: None,
                embeddable: false,
            },
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Storage name of the entity.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &'static str {
        self.key.simple_name()
    }

    pub fn class_name(&self) -> &'static str {
        self.key.class_name()
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Looks a field up by its Rust name.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_column(&self, column: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Like [`field`](Self::field), failing with `field_not_found`.
    pub fn expect_field(&self, name: &str) -> Result<&FieldMetadata> {
        self.field(name)
            .ok_or_else(|| Error::field_not_found(self.simple_name(), name))
    }

    pub fn id(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.id)
    }

    /// Like [`id`](Self::id), failing with `id_not_found`.
    pub fn expect_id(&self) -> Result<&FieldMetadata> {
        self.id()
            .ok_or_else(|| Error::id_not_found(self.simple_name()))
    }

    pub fn inheritance(&self) -> Option<&InheritanceMetadata> {
        self.inheritance.as_ref()
    }

    /// Inheritance details when this type is a subtype, i.e. when queries
    /// against it must filter on the discriminator.
    pub fn subtype_inheritance(&self) -> Option<&InheritanceMetadata> {
        self.inheritance.as_ref().filter(|i| !i.is_root())
    }

    pub fn constructor(&self) -> Option<&ConstructorMetadata> {
        self.constructor.as_ref()
    }

    pub fn is_embeddable(&self) -> bool {
        self.embeddable
    }

    /// A fresh, empty instance for field-by-field population.
    pub fn new_instance(&self) -> Result<Box<dyn Model>> {
        match self.instance {
            Some(instance) => Ok(instance()),
            None => Err(Error::from_args(format_args!(
                "`{}` cannot be instantiated without constructor arguments",
                self.simple_name()
            ))),
        }
    }
}

impl fmt::Debug for EntityMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMetadata")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("inheritance", &self.inheritance)
            .field("constructor", &self.constructor)
            .field("embeddable", &self.embeddable)
            .finish()
    }
}

impl EntityMetadataBuilder {
    pub fn field(mut self, field: FieldMetadata) -> Self {
        self.metadata.fields.push(field);
        self
    }

    /// Joins a single-table hierarchy rooted at `parent`.
    pub fn inheritance(
        mut self,
        discriminator_value: impl Into<String>,
        discriminator_column: impl Into<String>,
        parent: TypeKey,
    ) -> Self {
        self.metadata.inheritance = Some(InheritanceMetadata::new(
            discriminator_value,
            discriminator_column,
            parent,
            self.metadata.key,
        ));
        self
    }

    pub fn constructor(mut self, parameters: Vec<FieldMetadata>, build: InstanceBuilder) -> Self {
        self.metadata.constructor = Some(ConstructorMetadata::new(parameters, build));
        self
    }

    pub fn instance(mut self, instance: fn() -> Box<dyn Model>) -> Self {
        self.metadata.instance = Some(instance);
        self
    }

    /// Marks the type as embeddable: it is only stored inside other entities.
    pub fn embeddable(mut self) -> Self {
        self.metadata.embeddable = true;
        self
    }

    pub fn build(self) -> EntityMetadata {
        self.metadata
    }
}
