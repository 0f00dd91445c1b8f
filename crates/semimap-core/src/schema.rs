mod attribute;
pub use attribute::{Attribute, AttributeField, IntoAttribute};

mod constructor;
pub use constructor::{ConstructorMetadata, InstanceBuilder};

mod converter;
pub use converter::AttributeConverter;

mod entity;
pub use entity::{EntityMetadata, EntityMetadataBuilder};

mod field;
pub use field::{ElementTy, FieldMetadata, MappingKind};

mod inheritance;
pub use inheritance::InheritanceMetadata;

mod model;
pub use model::{Mapped, Model};

mod registry;
pub use registry::{EntitiesMetadata, Registry, RegistryBuilder};

mod type_key;
pub use type_key::TypeKey;
