use super::Error;

/// Error when a collection or array field holds a shape the converter cannot
/// handle.
#[derive(Debug)]
pub(super) struct UnsupportedCollectionType {
    field: Box<str>,
    found: &'static str,
}

impl std::error::Error for UnsupportedCollectionType {}

impl core::fmt::Display for UnsupportedCollectionType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported collection type: field `{}` cannot hold {}",
            self.field, self.found
        )
    }
}

impl Error {
    /// Creates an unsupported collection type error.
    pub fn unsupported_collection_type(field: impl Into<String>, found: &'static str) -> Error {
        Error::from(super::ErrorKind::UnsupportedCollectionType(
            UnsupportedCollectionType {
                field: field.into().into(),
                found,
            },
        ))
    }

    /// Returns `true` if this error is an unsupported collection type error.
    pub fn is_unsupported_collection_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedCollectionType(_))
    }
}
