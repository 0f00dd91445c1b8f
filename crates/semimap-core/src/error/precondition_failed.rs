use super::Error;

/// Error when a query does not meet the preconditions of the requested
/// operation, such as cursor pagination without a sort.
#[derive(Debug)]
pub(super) struct PreconditionFailed {
    message: Box<str>,
}

impl std::error::Error for PreconditionFailed {}

impl core::fmt::Display for PreconditionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "precondition failed: {}", self.message)
    }
}

impl Error {
    /// Creates a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PreconditionFailed(PreconditionFailed {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a precondition failed error.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PreconditionFailed(_))
    }
}
