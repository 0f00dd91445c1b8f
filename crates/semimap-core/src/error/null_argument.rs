use super::Error;

/// Error when a required argument is missing.
#[derive(Debug)]
pub(super) struct NullArgument {
    argument: Box<str>,
}

impl std::error::Error for NullArgument {}

impl core::fmt::Display for NullArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "null argument: `{}` is required", self.argument)
    }
}

impl Error {
    /// Creates a null argument error naming the missing argument.
    pub fn null_argument(argument: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NullArgument(NullArgument {
            argument: argument.into().into(),
        }))
    }

    /// Returns `true` if this error is a null argument error.
    pub fn is_null_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NullArgument(_))
    }
}
