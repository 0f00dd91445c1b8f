use super::Model;
use crate::{
    stmt::{Type, Value},
    Error, Result,
};

use indexmap::IndexMap;
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};
use uuid::Uuid;

/// The in-memory value of one field of a mapped object.
///
/// Scalars travel as [`Value`]. Nested mapped objects travel as boxed
/// [`Model`]s so the converter can recurse into them by metadata.
#[derive(Debug, Clone, Default)]
pub enum Attribute {
    /// Absent or `None`
    #[default]
    Null,

    /// A scalar, or a nested value kept as-is
    Value(Value),

    /// A nested mapped object
    Model(Box<dyn Model>),

    /// A growable collection
    List(Vec<Attribute>),

    /// A fixed-size array
    Array(Vec<Attribute>),

    /// A string-keyed map
    Map(IndexMap<String, Attribute>),
}

impl Attribute {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Value(value) => value.variant_name(),
            Self::Model(_) => "Model",
            Self::List(_) => "List",
            Self::Array(_) => "Array",
            Self::Map(_) => "Map",
        }
    }

    /// Converts the attribute into a field type.
    pub fn into_field<T: AttributeField>(self) -> Result<T> {
        T::from_attribute(self)
    }

    /// Flattens the attribute into a plain value. Nested models are not
    /// representable and fail.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Value(value) => Ok(value),
            Self::List(items) | Self::Array(items) => items
                .into_iter()
                .map(Self::into_value)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Self::Map(map) => map
                .into_iter()
                .map(|(k, v)| Ok((k, v.into_value()?)))
                .collect::<Result<IndexMap<_, _>>>()
                .map(Value::Map),
            Self::Model(model) => Err(Error::type_mismatch(
                "Model",
                format!("a value (found `{}`)", model.type_key()),
            )),
        }
    }

    /// Items of a collection or array attribute. `None` for other shapes.
    pub fn into_items(self) -> Option<Vec<Attribute>> {
        match self {
            Self::List(items) | Self::Array(items) => Some(items),
            Self::Value(Value::List(items)) => Some(items.into_iter().map(Self::Value).collect()),
            _ => None,
        }
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            value => Self::Value(value),
        }
    }
}

/// A Rust type that can be held by a field of a mapped object.
pub trait AttributeField: Sized {
    /// Declared type of the stored value, used for coercion.
    fn ty() -> Type {
        Type::Any
    }

    fn to_attribute(&self) -> Attribute;

    fn from_attribute(attribute: Attribute) -> Result<Self>;
}

/// Anything that can be passed where an attribute is expected, such as the
/// right-hand side of a condition.
pub trait IntoAttribute {
    fn into_attribute(self) -> Attribute;
}

impl<T: AttributeField> IntoAttribute for T {
    fn into_attribute(self) -> Attribute {
        self.to_attribute()
    }
}

impl IntoAttribute for &str {
    fn into_attribute(self) -> Attribute {
        Attribute::Value(Value::from(self))
    }
}

impl IntoAttribute for Attribute {
    fn into_attribute(self) -> Attribute {
        self
    }
}

fn expect_value(attribute: Attribute, to_type: &str) -> Result<Value> {
    match attribute {
        Attribute::Null => Ok(Value::Null),
        Attribute::Value(value) => Ok(value),
        other => Err(Error::type_mismatch(other.variant_name(), to_type)),
    }
}

macro_rules! impl_scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AttributeField for $ty {
                fn ty() -> Type {
                    Type::$variant
                }

                fn to_attribute(&self) -> Attribute {
                    Attribute::Value(Value::from(self.clone()))
                }

                /// Null reads as the type's default.
                fn from_attribute(attribute: Attribute) -> Result<Self> {
                    match expect_value(attribute, stringify!($ty))? {
                        Value::Null => Ok(<$ty>::default()),
                        value => <$ty>::try_from(value),
                    }
                }
            }
        )*
    };
}

impl_scalar_field! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => String,
    Uuid => Uuid,
}

impl AttributeField for Value {
    fn to_attribute(&self) -> Attribute {
        Attribute::from(self.clone())
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        attribute.into_value()
    }
}

impl<T: AttributeField> AttributeField for Option<T> {
    fn ty() -> Type {
        T::ty()
    }

    fn to_attribute(&self) -> Attribute {
        match self {
            Some(value) => value.to_attribute(),
            None => Attribute::Null,
        }
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        if attribute.is_null() {
            Ok(None)
        } else {
            T::from_attribute(attribute).map(Some)
        }
    }
}

impl<T: AttributeField> AttributeField for Box<T> {
    fn ty() -> Type {
        T::ty()
    }

    fn to_attribute(&self) -> Attribute {
        (**self).to_attribute()
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        T::from_attribute(attribute).map(Box::new)
    }
}

impl<T: AttributeField> AttributeField for Vec<T> {
    fn ty() -> Type {
        Type::list(T::ty())
    }

    fn to_attribute(&self) -> Attribute {
        Attribute::List(self.iter().map(T::to_attribute).collect())
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        if attribute.is_null() {
            return Ok(vec![]);
        }

        let found = attribute.variant_name();
        match attribute.into_items() {
            Some(items) => items.into_iter().map(T::from_attribute).collect(),
            None => Err(Error::type_mismatch(found, "a list")),
        }
    }
}

impl<T: AttributeField, const N: usize> AttributeField for [T; N] {
    fn ty() -> Type {
        Type::list(T::ty())
    }

    fn to_attribute(&self) -> Attribute {
        Attribute::Array(self.iter().map(T::to_attribute).collect())
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        let items: Vec<T> = Vec::from_attribute(attribute)?;
        let len = items.len();

        items.try_into().map_err(|_| {
            Error::illegal_argument(format!("expected an array of {N} items, found {len}"))
        })
    }
}

fn map_from_attribute<T, M>(attribute: Attribute) -> Result<M>
where
    T: AttributeField,
    M: FromIterator<(String, T)>,
{
    match attribute {
        Attribute::Null | Attribute::Value(Value::Null) => Ok(M::from_iter([])),
        Attribute::Map(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, T::from_attribute(v)?)))
            .collect(),
        Attribute::Value(Value::Map(map)) => map
            .into_iter()
            .map(|(k, v)| Ok((k, T::from_attribute(Attribute::from(v))?)))
            .collect(),
        other => Err(Error::type_mismatch(other.variant_name(), "a map")),
    }
}

impl<T: AttributeField, S: BuildHasher + Default> AttributeField for HashMap<String, T, S> {
    fn ty() -> Type {
        Type::map(T::ty())
    }

    fn to_attribute(&self) -> Attribute {
        Attribute::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_attribute()))
                .collect(),
        )
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        map_from_attribute(attribute)
    }
}

impl<T: AttributeField> AttributeField for BTreeMap<String, T> {
    fn ty() -> Type {
        Type::map(T::ty())
    }

    fn to_attribute(&self) -> Attribute {
        Attribute::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_attribute()))
                .collect(),
        )
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        map_from_attribute(attribute)
    }
}

impl<T: AttributeField, S: BuildHasher + Default> AttributeField for IndexMap<String, T, S> {
    fn ty() -> Type {
        Type::map(T::ty())
    }

    fn to_attribute(&self) -> Attribute {
        Attribute::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_attribute()))
                .collect(),
        )
    }

    fn from_attribute(attribute: Attribute) -> Result<Self> {
        map_from_attribute(attribute)
    }
}
