use super::Error;
use crate::stmt::Function;

/// Error when a storage driver cannot evaluate a function expression.
#[derive(Debug)]
pub(super) struct UnsupportedFunction {
    function: &'static str,
    database: Box<str>,
}

impl std::error::Error for UnsupportedFunction {}

impl core::fmt::Display for UnsupportedFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported function: `{}` is not supported by `{}`",
            self.function, self.database
        )
    }
}

impl Error {
    /// Creates an unsupported function error naming the function and the
    /// database that rejected it.
    pub fn unsupported_function(function: &Function, database: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedFunction(UnsupportedFunction {
            function: function.name(),
            database: database.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported function error.
    pub fn is_unsupported_function(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedFunction(_))
    }
}
