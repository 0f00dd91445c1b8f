use super::{Element, Param, Type};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;
use uuid::Uuid;

/// A storage-agnostic value held by an [`Element`].
///
/// Besides scalars, a value can nest: a list of values, a map keyed by
/// string, or a whole sub-entity expressed as its own element list.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 32-bit floating point number
    F32(f32),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// An ordered list of values. A list of [`Value::Entity`] items is how an
    /// embedded collection is stored.
    List(Vec<Value>),

    /// A string-keyed map of values
    Map(IndexMap<String, Value>),

    /// A nested sub-entity
    Entity(Vec<Element>),

    /// A query parameter that has not been bound yet
    Param(Param),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    pub const fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Returns `true` for values that carry no nested structure.
    pub const fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::List(_) | Self::Map(_) | Self::Entity(_) | Self::Param(_)
        )
    }

    /// Returns `true` if the value is a number of any width.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_) | Self::F32(_) | Self::F64(_)
        )
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is an integer of any width.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&[Element]> {
        match self {
            Self::Entity(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(items) => Ok(items),
            value => Err(Error::type_conversion(value, "List")),
        }
    }

    pub fn into_entity(self) -> Result<Vec<Element>> {
        match self {
            Self::Entity(elements) => Ok(elements),
            value => Err(Error::type_conversion(value, "Entity")),
        }
    }

    /// Returns the name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::I8(_) => "I8",
            Self::I16(_) => "I16",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F32(_) => "F32",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::Uuid(_) => "Uuid",
            Self::Bytes(_) => "Bytes",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Entity(_) => "Entity",
            Self::Param(_) => "Param",
            Self::Null => "Null",
        }
    }

    /// Infers the type of the value. Lists and maps take the type of their
    /// first item.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I8(_) => Type::I8,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::Uuid(_) => Type::Uuid,
            Self::Bytes(_) => Type::Bytes,
            Self::List(items) => Type::list(items.first().map(Self::infer_ty).unwrap_or(Type::Any)),
            Self::Map(map) => Type::map(map.values().next().map(Self::infer_ty).unwrap_or(Type::Any)),
            Self::Entity(_) => Type::Entity,
            Self::Param(_) | Self::Null => Type::Any,
        }
    }

    /// The empty placeholder for a declared type: `false` for booleans, zero
    /// for numbers and `Null` for everything else.
    pub fn empty_of(ty: &Type) -> Value {
        match ty {
            Type::Bool => Value::Bool(false),
            Type::I8 => Value::I8(0),
            Type::I16 => Value::I16(0),
            Type::I32 => Value::I32(0),
            Type::I64 => Value::I64(0),
            Type::F32 => Value::F32(0.0),
            Type::F64 => Value::F64(0.0),
            _ => Value::Null,
        }
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::I8(v) => v.fmt(f),
            Self::I16(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Uuid(v) => v.fmt(f),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Entity(elements) => {
                f.write_str("{")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", element.name, element.value)?;
                }
                f.write_str("}")
            }
            Self::Param(param) => param.fmt(f),
            Self::Null => f.write_str("null"),
        }
    }
}

impl AsRef<Self> for Value {
    fn as_ref(&self) -> &Self {
        self
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(src: $ty) -> Self {
                    Self::$variant(src)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value.coerce(&Type::$variant)? {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::type_conversion(other, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_from_scalar! {
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

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src.into())
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<Vec<Element>> for Value {
    fn from(src: Vec<Element>) -> Self {
        Self::Entity(src)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(src: IndexMap<String, Value>) -> Self {
        Self::Map(src)
    }
}

impl From<Param> for Value {
    fn from(src: Param) -> Self {
        Self::Param(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}
