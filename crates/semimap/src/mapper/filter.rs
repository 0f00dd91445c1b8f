use super::{Field, Resolver, Restriction};

use semimap_core::{
    schema::{Attribute, IntoAttribute},
    stmt::{CriteriaCondition, Operator},
    Error, Result,
};

/// Accumulates WHERE clauses for a builder.
///
/// Leaves are recorded as they are appended and resolved against the
/// entity's metadata when the statement is built. Builder misuse, such as
/// an operator with no field, is kept and reported by the terminal call.
#[derive(Debug)]
pub(crate) struct Where {
    /// Field the next operator applies to
    current: Option<Field>,

    /// Set by `not()`, consumed by the next leaf
    negate: bool,

    /// Sticky until the next `and`/`or`
    and: bool,

    clauses: Vec<Clause>,

    error: Option<Error>,
}

#[derive(Debug)]
struct Clause {
    and: bool,
    negate: bool,
    kind: ClauseKind,
}

#[derive(Debug)]
enum ClauseKind {
    Compare {
        field: Field,
        op: Operator,
        value: Attribute,
    },
    Restriction(Restriction),
}

impl Default for Where {
    fn default() -> Self {
        Self {
            current: None,
            negate: false,
            and: true,
            clauses: vec![],
            error: None,
        }
    }
}

impl Where {
    pub(crate) fn field(&mut self, field: impl Into<Field>) {
        self.current = Some(field.into());
    }

    pub(crate) fn and(&mut self, field: impl Into<Field>) {
        self.and = true;
        self.field(field);
    }

    pub(crate) fn or(&mut self, field: impl Into<Field>) {
        self.and = false;
        self.field(field);
    }

    pub(crate) fn not(&mut self) {
        self.negate = true;
    }

    pub(crate) fn compare(&mut self, op: Operator, value: impl IntoAttribute) {
        let Some(field) = self.current.clone() else {
            self.fail(Error::illegal_argument(format!(
                "`{op}` requires a field; call `filter`, `and` or `or` first"
            )));
            return;
        };

        let value = value.into_attribute();
        self.push(ClauseKind::Compare { field, op, value });
    }

    pub(crate) fn between(&mut self, low: impl IntoAttribute, high: impl IntoAttribute) {
        let bounds = Attribute::List(vec![low.into_attribute(), high.into_attribute()]);
        self.compare(Operator::Between, bounds);
    }

    pub(crate) fn in_list<V: IntoAttribute>(&mut self, values: impl IntoIterator<Item = V>) {
        let values = values.into_iter().map(IntoAttribute::into_attribute).collect();
        self.compare(Operator::In, Attribute::List(values));
    }

    /// Appends an already built restriction as one leaf.
    pub(crate) fn restriction(&mut self, restriction: Restriction) {
        self.push(ClauseKind::Restriction(restriction));
    }

    /// Appends a restriction combined with `AND`.
    pub(crate) fn and_restriction(&mut self, restriction: Restriction) {
        self.and = true;
        self.restriction(restriction);
    }

    fn push(&mut self, kind: ClauseKind) {
        self.clauses.push(Clause {
            and: self.and,
            negate: std::mem::take(&mut self.negate),
            kind,
        });
    }

    fn fail(&mut self, error: Error) {
        self.error.get_or_insert(error);
    }

    /// Builds the condition tree in build order. For subtypes the whole
    /// tree is ANDed with the discriminator filter.
    pub(crate) fn build(self, resolver: &Resolver<'_>) -> Result<Option<CriteriaCondition>> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut condition: Option<CriteriaCondition> = None;

        for clause in self.clauses {
            let leaf = match clause.kind {
                ClauseKind::Compare { field, op, value } => resolver.compare(&field, op, value)?,
                ClauseKind::Restriction(restriction) => {
                    match resolver.restriction(&restriction)? {
                        Some(leaf) => leaf,
                        None => continue,
                    }
                }
            };

            let leaf = if clause.negate {
                CriteriaCondition::not(leaf)
            } else {
                leaf
            };

            condition = Some(match condition {
                Some(condition) => condition.combine(leaf, clause.and),
                None => leaf,
            });
        }

        Ok(match (resolver.discriminator(), condition) {
            (Some(discriminator), Some(condition)) => Some(discriminator.and(condition)),
            (discriminator, condition) => discriminator.or(condition),
        })
    }
}

/// Implements the WHERE surface on a builder holding a `filter: Where`
/// field.
macro_rules! where_methods {
    ($builder:ident) => {
        impl<'a, M: semimap_core::schema::Mapped> $builder<'a, M> {
            /// Starts a condition on `field`.
            pub fn filter(mut self, field: impl Into<$crate::mapper::Field>) -> Self {
                self.filter.field(field);
                self
            }

            /// Starts a condition combined with `AND`. The mode stays in
            /// effect until the next `or`.
            pub fn and(mut self, field: impl Into<$crate::mapper::Field>) -> Self {
                self.filter.and(field);
                self
            }

            /// Starts a condition combined with `OR`. The mode stays in
            /// effect until the next `and`.
            pub fn or(mut self, field: impl Into<$crate::mapper::Field>) -> Self {
                self.filter.or(field);
                self
            }

            /// Negates the next condition only.
            pub fn not(mut self) -> Self {
                self.filter.not();
                self
            }

            pub fn eq(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::Equals, value);
                self
            }

            pub fn gt(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::GreaterThan, value);
                self
            }

            pub fn gte(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::GreaterEquals, value);
                self
            }

            pub fn lt(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::LesserThan, value);
                self
            }

            pub fn lte(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::LesserEquals, value);
                self
            }

            pub fn like(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::Like, value);
                self
            }

            pub fn contains(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::Contains, value);
                self
            }

            pub fn starts_with(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::StartsWith, value);
                self
            }

            pub fn ends_with(mut self, value: impl semimap_core::schema::IntoAttribute) -> Self {
                self.filter.compare(semimap_core::stmt::Operator::EndsWith, value);
                self
            }

            /// Inclusive range.
            pub fn between(
                mut self,
                low: impl semimap_core::schema::IntoAttribute,
                high: impl semimap_core::schema::IntoAttribute,
            ) -> Self {
                self.filter.between(low, high);
                self
            }

            /// Matches any of `values`, which must not be empty.
            pub fn in_list<V: semimap_core::schema::IntoAttribute>(
                mut self,
                values: impl IntoIterator<Item = V>,
            ) -> Self {
                self.filter.in_list(values);
                self
            }

            /// Appends a restriction as one condition, combined like any
            /// other.
            pub fn restrict(mut self, restriction: $crate::mapper::Restriction) -> Self {
                self.filter.restriction(restriction);
                self
            }
        }
    };
}
