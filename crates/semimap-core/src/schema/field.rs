use super::{AttributeConverter, TypeKey};
use crate::stmt::Type;

use std::{fmt, sync::Arc};

/// How a field is laid out in the element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// A single scalar or raw value element
    Default,

    /// Sub-fields flattened into the parent's element list
    Embedded,

    /// A nested sub-entity under one element
    Entity,

    /// A nested group of columns under one element, stored like `Entity`
    EmbeddedGroup,

    /// A growable collection
    Collection,

    /// A string-keyed map
    Map,

    /// A fixed-size array
    Array,
}

/// Type of the items held by a collection, array or map field.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementTy {
    /// Items are plain values of the given type
    Scalar(Type),

    /// Items are mapped objects described by the registry
    Embeddable(TypeKey),
}

/// Describes one field of a mapped type.
#[derive(Clone)]
pub struct FieldMetadata {
    /// Name of the field on the Rust type
    pub name: String,

    /// Name of the element in storage
    pub column: String,

    pub kind: MappingKind,

    /// Declared value type, used to coerce stored values
    pub ty: Type,

    /// Item type of collection, array and map fields
    pub element: Option<ElementTy>,

    /// Mapped type of embedded and entity fields
    pub target: Option<TypeKey>,

    /// Custom conversion between the attribute and its stored value
    pub converter: Option<Arc<dyn AttributeConverter>>,

    /// The field is the entity's id
    pub id: bool,
}

impl FieldMetadata {
    /// A field stored under its own name.
    pub fn new(name: impl Into<String>, kind: MappingKind) -> Self {
        let name = name.into();

        Self {
            column: name.clone(),
            name,
            kind,
            ty: Type::Any,
            element: None,
            target: None,
            converter: None,
            id: false,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn ty(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    pub fn element(mut self, element: ElementTy) -> Self {
        self.element = Some(element);
        self
    }

    pub fn target(mut self, target: TypeKey) -> Self {
        self.target = Some(target);
        self
    }

    pub fn converter(mut self, converter: impl AttributeConverter) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Marks the field as the entity id. Id fields are stored as `_id`
    /// unless a column is set afterwards.
    pub fn id(mut self) -> Self {
        self.id = true;
        self.column = "_id".to_string();
        self
    }

    /// Mapped type of the collection, array or map items, if they are
    /// embeddable.
    pub fn embeddable_element(&self) -> Option<TypeKey> {
        match self.element {
            Some(ElementTy::Embeddable(key)) => Some(key),
            _ => None,
        }
    }

    /// Declared type of the items, when they are plain values.
    pub fn scalar_element(&self) -> Option<&Type> {
        match &self.element {
            Some(ElementTy::Scalar(ty)) => Some(ty),
            _ => None,
        }
    }

    /// `true` for fields whose stored value nests other elements.
    pub fn is_nested(&self) -> bool {
        matches!(
            self.kind,
            MappingKind::Embedded | MappingKind::Entity | MappingKind::EmbeddedGroup
        )
    }
}

impl fmt::Debug for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("ty", &self.ty)
            .field("element", &self.element)
            .field("target", &self.target)
            .field("converter", &self.converter.is_some())
            .field("id", &self.id)
            .finish()
    }
}
