use crate::mapper::Restriction;

use semimap_core::{
    schema::{Attribute, IntoAttribute, TypeKey},
    stmt::{Direction, PageRequest},
};

/// One invocation of a repository method: its name, declarations and
/// arguments.
///
/// ```ignore
/// let method = RepositoryMethod::new("findFirst3ByAgeGreaterThanOrderByNameAsc")
///     .arg(30)
///     .returns(ResultKind::Many);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryMethod {
    pub(crate) name: String,
    pub(crate) query: Option<String>,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) result: ResultKind,
    pub(crate) first: Option<u64>,
    pub(crate) projection: Vec<String>,
    pub(crate) return_types: Vec<TypeKey>,
    pub(crate) parameter_types: Vec<TypeKey>,
}

/// An argument passed to a repository method.
#[derive(Debug, Clone)]
pub enum Argument {
    /// A value bound to the derived condition in order, to `?N` by position
    /// and to `:name` by its parameter name.
    Value {
        name: Option<String>,
        value: Attribute,
    },

    /// Combined with the method's condition using `AND`
    Restriction(Restriction),

    /// Applied after the method's own sorts
    Sort { field: String, direction: Direction },

    Page(PageRequest),

    /// Caps the number of results
    Limit(u64),
}

/// What the caller expects back from a select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultKind {
    /// Every match
    #[default]
    Many,

    /// At most one match; more is a non-unique result error
    Single,
}

impl RepositoryMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a query in text, used instead of the method name.
    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    pub fn returns(mut self, result: ResultKind) -> Self {
        self.result = result;
        self
    }

    /// Declares an upper bound on the number of results.
    pub fn first(mut self, limit: u64) -> Self {
        self.first = Some(limit);
        self
    }

    /// Returns only the listed fields. One field yields scalars; more yield
    /// lists in the listed order.
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.projection = fields.into_iter().map(Into::into).collect();
        self
    }

    /// A type named in the method's return type, consulted to find the
    /// entity when the repository does not declare one.
    pub fn return_type(mut self, key: TypeKey) -> Self {
        self.return_types.push(key);
        self
    }

    /// A type named in the method's parameters.
    pub fn parameter_type(mut self, key: TypeKey) -> Self {
        self.parameter_types.push(key);
        self
    }

    pub fn arg(mut self, value: impl IntoAttribute) -> Self {
        self.arguments.push(Argument::Value {
            name: None,
            value: value.into_attribute(),
        });
        self
    }

    pub fn named_arg(mut self, name: impl Into<String>, value: impl IntoAttribute) -> Self {
        self.arguments.push(Argument::Value {
            name: Some(name.into()),
            value: value.into_attribute(),
        });
        self
    }

    pub fn restriction(mut self, restriction: Restriction) -> Self {
        self.arguments.push(Argument::Restriction(restriction));
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.arguments.push(Argument::Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn page(mut self, request: PageRequest) -> Self {
        self.arguments.push(Argument::Page(request));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.arguments.push(Argument::Limit(limit));
        self
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = (Option<&str>, &Attribute)> + '_ {
        self.arguments.iter().filter_map(|argument| match argument {
            Argument::Value { name, value } => Some((name.as_deref(), value)),
            _ => None,
        })
    }

    pub(crate) fn restrictions(&self) -> impl Iterator<Item = &Restriction> + '_ {
        self.arguments.iter().filter_map(|argument| match argument {
            Argument::Restriction(restriction) => Some(restriction),
            _ => None,
        })
    }

    pub(crate) fn sorts(&self) -> impl Iterator<Item = (&str, Direction)> + '_ {
        self.arguments.iter().filter_map(|argument| match argument {
            Argument::Sort { field, direction } => Some((field.as_str(), *direction)),
            _ => None,
        })
    }

    pub(crate) fn page_request(&self) -> Option<&PageRequest> {
        self.arguments.iter().find_map(|argument| match argument {
            Argument::Page(request) => Some(request),
            _ => None,
        })
    }

    pub(crate) fn limit_argument(&self) -> Option<u64> {
        self.arguments.iter().find_map(|argument| match argument {
            Argument::Limit(limit) => Some(*limit),
            _ => None,
        })
    }
}
