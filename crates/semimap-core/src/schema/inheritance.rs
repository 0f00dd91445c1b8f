use super::TypeKey;

/// Single-table inheritance details of a mapped type.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceMetadata {
    /// Value stored in the discriminator column for this type
    pub discriminator_value: String,

    /// Column holding the discriminator
    pub discriminator_column: String,

    /// Root of the hierarchy
    pub parent: TypeKey,

    /// The type these details belong to
    pub entity: TypeKey,
}

impl InheritanceMetadata {
    /// The default discriminator column.
    pub const DEFAULT_COLUMN: &'static str = "dtype";

    pub fn new(
        discriminator_value: impl Into<String>,
        discriminator_column: impl Into<String>,
        parent: TypeKey,
        entity: TypeKey,
    ) -> Self {
        Self {
            discriminator_value: discriminator_value.into(),
            discriminator_column: discriminator_column.into(),
            parent,
            entity,
        }
    }

    /// `true` when this type is the root of its hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent == self.entity
    }
}
