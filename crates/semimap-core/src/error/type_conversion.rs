use super::Error;
use crate::stmt::Value;

/// Error when a value cannot be converted to the expected type.
#[derive(Debug)]
pub(super) struct TypeConversion {
    from: &'static str,
    to_type: Box<str>,
}

impl std::error::Error for TypeConversion {}

impl core::fmt::Display for TypeConversion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.from, self.to_type)
    }
}

impl Error {
    /// Creates a type conversion error.
    ///
    /// This is used when a value cannot be coerced into a declared field type,
    /// either because the shapes differ or because the value is out of range.
    pub fn type_conversion(value: Value, to_type: impl Into<String>) -> Error {
        Error::type_mismatch(value.variant_name(), to_type)
    }

    /// Creates a type conversion error from the name of the shape that was
    /// found.
    pub fn type_mismatch(from: &'static str, to_type: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversion {
            from,
            to_type: to_type.into().into(),
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }
}
