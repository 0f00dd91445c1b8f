use super::Error;

/// Error when an argument has the wrong arity or an out of range value.
#[derive(Debug)]
pub(super) struct IllegalArgument {
    message: Box<str>,
}

impl std::error::Error for IllegalArgument {}

impl core::fmt::Display for IllegalArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "illegal argument: {}", self.message)
    }
}

impl Error {
    /// Creates an illegal argument error.
    pub fn illegal_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IllegalArgument(IllegalArgument {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an illegal argument error.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IllegalArgument(_))
    }
}
