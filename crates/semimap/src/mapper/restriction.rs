use super::Field;

use semimap_core::{
    schema::{Attribute, IntoAttribute},
    stmt::Operator,
};

/// A prebuilt filter, combinable with builder and method-derived
/// conditions.
///
/// ```ignore
/// let adults = Restriction::gte("age", 18).and(Restriction::eq("active", true));
/// template.select::<Person>().restrict(adults).result().await?;
/// ```
#[derive(Debug, Clone)]
pub enum Restriction {
    Compare {
        field: Field,
        op: Operator,
        value: Attribute,
    },

    /// Every restriction holds. Empty means no filter.
    All(Vec<Restriction>),

    /// At least one restriction holds. Empty means no filter.
    Any(Vec<Restriction>),

    Not(Box<Restriction>),
}

impl Restriction {
    pub fn compare(field: impl Into<Field>, op: Operator, value: impl IntoAttribute) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into_attribute(),
        }
    }

    pub fn eq(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::Equals, value)
    }

    pub fn gt(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::GreaterThan, value)
    }

    pub fn gte(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::GreaterEquals, value)
    }

    pub fn lt(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::LesserThan, value)
    }

    pub fn lte(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::LesserEquals, value)
    }

    pub fn like(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::Like, value)
    }

    pub fn contains(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::Contains, value)
    }

    pub fn starts_with(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::StartsWith, value)
    }

    pub fn ends_with(field: impl Into<Field>, value: impl IntoAttribute) -> Self {
        Self::compare(field, Operator::EndsWith, value)
    }

    pub fn between(
        field: impl Into<Field>,
        low: impl IntoAttribute,
        high: impl IntoAttribute,
    ) -> Self {
        let bounds = Attribute::List(vec![low.into_attribute(), high.into_attribute()]);
        Self::compare(field, Operator::Between, bounds)
    }

    pub fn in_list<V: IntoAttribute>(
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(IntoAttribute::into_attribute).collect();
        Self::compare(field, Operator::In, Attribute::List(values))
    }

    pub fn all(restrictions: impl IntoIterator<Item = Restriction>) -> Self {
        Self::All(restrictions.into_iter().collect())
    }

    pub fn any(restrictions: impl IntoIterator<Item = Restriction>) -> Self {
        Self::Any(restrictions.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(restriction: Restriction) -> Self {
        Self::Not(Box::new(restriction))
    }

    pub fn and(self, rhs: Restriction) -> Self {
        match self {
            Self::All(mut items) => {
                items.push(rhs);
                Self::All(items)
            }
            lhs => Self::All(vec![lhs, rhs]),
        }
    }

    pub fn or(self, rhs: Restriction) -> Self {
        match self {
            Self::Any(mut items) => {
                items.push(rhs);
                Self::Any(items)
            }
            lhs => Self::Any(vec![lhs, rhs]),
        }
    }
}
