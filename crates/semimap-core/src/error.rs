mod adhoc;
mod class_information_not_found;
mod driver;
mod field_not_found;
mod id_not_found;
mod illegal_argument;
mod invalid_map_value_type;
mod non_unique_result;
mod null_argument;
mod precondition_failed;
mod type_conversion;
mod unsupported_collection_type;
mod unsupported_function;
mod unsupported_operation;

use adhoc::AdhocError;
use class_information_not_found::ClassInformationNotFound;
use driver::DriverError;
use field_not_found::FieldNotFound;
use id_not_found::IdNotFound;
use illegal_argument::IllegalArgument;
use invalid_map_value_type::InvalidMapValueType;
use non_unique_result::NonUniqueResult;
use null_argument::NullArgument;
use precondition_failed::PreconditionFailed;
use std::sync::Arc;
use type_conversion::TypeConversion;
use unsupported_collection_type::UnsupportedCollectionType;
use unsupported_function::UnsupportedFunction;
use unsupported_operation::UnsupportedOperation;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while mapping entities or building and executing
/// queries.
///
/// The error is a single pointer wide. Context can be layered on with
/// [`Error::context`]; the chain is displayed outermost first.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if the root cause is a metadata lookup failure
    /// (unknown entity, id or field).
    pub fn is_metadata(&self) -> bool {
        let root = self.root();
        root.is_class_information_not_found() || root.is_id_not_found() || root.is_field_not_found()
    }

    /// Returns `true` if the root cause is a conversion failure between stored
    /// data and entity attributes.
    pub fn is_conversion(&self) -> bool {
        let root = self.root();
        root.is_type_conversion()
            || root.is_invalid_map_value_type()
            || root.is_unsupported_collection_type()
    }

    /// Returns `true` if the root cause is a local validation failure raised
    /// while building a query.
    pub fn is_query_construction(&self) -> bool {
        let root = self.root();
        root.is_null_argument() || root.is_illegal_argument() || root.is_precondition_failed()
    }

    /// Returns `true` if the root cause is a mismatch between the requested
    /// operation and the statement kind or driver capability.
    pub fn is_capability(&self) -> bool {
        let root = self.root();
        root.is_unsupported_function() || root.is_unsupported_operation()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    ClassInformationNotFound(ClassInformationNotFound),
    IdNotFound(IdNotFound),
    FieldNotFound(FieldNotFound),
    TypeConversion(TypeConversion),
    InvalidMapValueType(InvalidMapValueType),
    UnsupportedCollectionType(UnsupportedCollectionType),
    NullArgument(NullArgument),
    IllegalArgument(IllegalArgument),
    PreconditionFailed(PreconditionFailed),
    NonUniqueResult(NonUniqueResult),
    UnsupportedFunction(UnsupportedFunction),
    UnsupportedOperation(UnsupportedOperation),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            ClassInformationNotFound(err) => core::fmt::Display::fmt(err, f),
            IdNotFound(err) => core::fmt::Display::fmt(err, f),
            FieldNotFound(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            InvalidMapValueType(err) => core::fmt::Display::fmt(err, f),
            UnsupportedCollectionType(err) => core::fmt::Display::fmt(err, f),
            NullArgument(err) => core::fmt::Display::fmt(err, f),
            IllegalArgument(err) => core::fmt::Display::fmt(err, f),
            PreconditionFailed(err) => core::fmt::Display::fmt(err, f),
            NonUniqueResult(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFunction(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown semimap error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::str::ParseBoolError> for Error {
    fn from(err: std::str::ParseBoolError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
