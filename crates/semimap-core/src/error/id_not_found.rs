use super::Error;

/// Error when an operation needs the id field of an entity that has none.
#[derive(Debug)]
pub(super) struct IdNotFound {
    entity: Box<str>,
}

impl std::error::Error for IdNotFound {}

impl core::fmt::Display for IdNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "id not found: entity `{}` does not declare an id field",
            self.entity
        )
    }
}

impl Error {
    /// Creates an id not found error for the named entity.
    pub fn id_not_found(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IdNotFound(IdNotFound {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is an id not found error.
    pub fn is_id_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IdNotFound(_))
    }
}
