use super::Error;

/// Error when a stored map entry does not have the nested shape its field
/// expects.
#[derive(Debug)]
pub(super) struct InvalidMapValueType {
    field: Box<str>,
    found: &'static str,
}

impl std::error::Error for InvalidMapValueType {}

impl core::fmt::Display for InvalidMapValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid map value type: field `{}` expects nested elements, found {}",
            self.field, self.found
        )
    }
}

impl Error {
    /// Creates an invalid map value type error.
    pub fn invalid_map_value_type(field: impl Into<String>, found: &'static str) -> Error {
        Error::from(super::ErrorKind::InvalidMapValueType(InvalidMapValueType {
            field: field.into().into(),
            found,
        }))
    }

    /// Returns `true` if this error is an invalid map value type error.
    pub fn is_invalid_map_value_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMapValueType(_))
    }
}
