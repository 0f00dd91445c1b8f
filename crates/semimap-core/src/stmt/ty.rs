use std::fmt;

/// The declared type of a field, used to coerce stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 32-bit floating point number
    F32,

    /// 64-bit floating point number
    F64,

    /// String type
    String,

    /// UUID type
    Uuid,

    /// Raw bytes
    Bytes,

    /// A list of a single type
    List(Box<Type>),

    /// A string-keyed map of a single value type
    Map(Box<Type>),

    /// A nested sub-entity
    Entity,

    /// Accepts any value without coercion
    Any,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn map(ty: impl Into<Self>) -> Self {
        Self::Map(Box::new(ty.into()))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::F32 | Self::F64
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// For list and map types, the type of their items. Other types return
    /// themselves.
    pub fn item(&self) -> &Type {
        match self {
            Self::List(item) | Self::Map(item) => item,
            ty => ty,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::I8 => f.write_str("i8"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::String => f.write_str("String"),
            Self::Uuid => f.write_str("Uuid"),
            Self::Bytes => f.write_str("Bytes"),
            Self::List(item) => write!(f, "List<{item}>"),
            Self::Map(item) => write!(f, "Map<String, {item}>"),
            Self::Entity => f.write_str("Entity"),
            Self::Any => f.write_str("Any"),
        }
    }
}
