mod config;
pub use config::Config;

pub mod convert;
pub use convert::EntityConverter;

mod events;
pub use events::{EventHooks, NoEvents};

pub mod mapper;
pub use mapper::{MapperDelete, MapperSelect, MapperUpdate, Restriction};

pub mod page;
pub use page::{CursorPage, Page};

mod stream;
pub use stream::ModelStream;

mod query;
pub use query::TextQuery;

pub mod repository;
pub use repository::{Argument, DynRepository, Outcome, Repository, RepositoryMethod, ResultKind};

pub mod template;
pub use template::Template;

pub use semimap_core::{
    driver::{self, Driver},
    schema::{self, Attribute, AttributeField, EntitiesMetadata, Mapped, Model, Registry},
    stmt, Error, Result,
};

pub use semimap_macros::Model;

#[doc(hidden)]
pub mod codegen_support {
    pub use semimap_core::{
        schema::{
            Attribute, AttributeConverter, AttributeField, ElementTy, EntityMetadata,
            FieldMetadata, InheritanceMetadata, Mapped, MappingKind, Model, TypeKey,
        },
        stmt::{Type, Value},
        Error, Result,
    };
    pub use std::{
        any::Any,
        boxed::Box,
        default::Default,
        option::Option,
        string::String,
        vec::Vec,
    };
}
