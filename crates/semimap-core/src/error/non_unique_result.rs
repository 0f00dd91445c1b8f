use super::Error;

/// Error when a single-result operation matches more than one entity.
#[derive(Debug)]
pub(super) struct NonUniqueResult {
    entity: Box<str>,
}

impl std::error::Error for NonUniqueResult {}

impl core::fmt::Display for NonUniqueResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "non unique result: query on `{}` returned more than one entity",
            self.entity
        )
    }
}

impl Error {
    /// Creates a non unique result error for a query on the named entity.
    pub fn non_unique_result(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NonUniqueResult(NonUniqueResult {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is a non unique result error.
    pub fn is_non_unique_result(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NonUniqueResult(_))
    }
}
