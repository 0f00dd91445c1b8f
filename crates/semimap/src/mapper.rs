//! Fluent select, delete and update builders.
//!
//! All three builders share one WHERE accumulator, so negation, `and`/`or`
//! toggling and inheritance seeding behave the same for every statement
//! kind. Builders are single use and not meant to be shared across tasks.

#[macro_use]
mod filter;
pub(crate) use filter::Where;

mod delete;
pub use delete::MapperDelete;

mod resolve;
pub(crate) use resolve::Resolver;

mod restriction;
pub use restriction::Restriction;

mod select;
pub use select::{MapperSelect, OrderBy};

mod update;
pub use update::{MapperUpdate, UpdateSet};

use semimap_core::stmt::FunctionExpr;

/// The left-hand side of a condition or sort: a field path such as `name`
/// or `address.city`, or a function applied to one.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Name(String),
    Function(FunctionExpr),
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<&String> for Field {
    fn from(value: &String) -> Self {
        Self::Name(value.clone())
    }
}

impl From<FunctionExpr> for Field {
    fn from(value: FunctionExpr) -> Self {
        Self::Function(value)
    }
}
