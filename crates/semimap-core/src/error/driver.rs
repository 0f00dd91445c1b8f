use super::Error;

use std::time::Duration;

/// Error raised by a storage driver while serving a call against one entity
/// collection.
///
/// Timeouts and cancellation belong to the driver. The mapping layer passes
/// them on like any other driver failure, so callers can still tell them
/// apart.
#[derive(Debug)]
pub(super) struct DriverError {
    entity: Box<str>,
    failure: Failure,
}

#[derive(Debug)]
enum Failure {
    Failed(Box<dyn std::error::Error + Send + Sync>),
    TimedOut(Duration),
    Cancelled,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.failure {
            Failure::Failed(inner) => Some(inner.as_ref()),
            Failure::TimedOut(_) | Failure::Cancelled => None,
        }
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.failure {
            Failure::Failed(inner) => {
                write!(f, "driver failed on `{}`: {inner}", self.entity)?;
                let mut source = inner.source();
                while let Some(err) = source {
                    write!(f, ": {err}")?;
                    source = err.source();
                }
                Ok(())
            }
            Failure::TimedOut(after) => {
                write!(f, "driver timed out on `{}` after {after:?}", self.entity)
            }
            Failure::Cancelled => write!(f, "driver call on `{}` was cancelled", self.entity),
        }
    }
}

impl Error {
    /// Wraps a driver's own failure on the collection named `entity`.
    pub fn driver(
        entity: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::driver_failure(entity, Failure::Failed(Box::new(err)))
    }

    /// A driver call on `entity` that did not finish within `after`.
    pub fn driver_timeout(entity: impl Into<String>, after: Duration) -> Error {
        Error::driver_failure(entity, Failure::TimedOut(after))
    }

    /// A driver call on `entity` that was cancelled before it finished.
    pub fn driver_cancelled(entity: impl Into<String>) -> Error {
        Error::driver_failure(entity, Failure::Cancelled)
    }

    fn driver_failure(entity: impl Into<String>, failure: Failure) -> Error {
        Error::from(super::ErrorKind::Driver(DriverError {
            entity: entity.into().into(),
            failure,
        }))
    }

    /// Returns `true` if the root cause is a driver error of any kind.
    pub fn is_driver(&self) -> bool {
        self.driver_error().is_some()
    }

    /// Returns `true` if the root cause is a driver timeout.
    pub fn is_driver_timeout(&self) -> bool {
        self.driver_error()
            .is_some_and(|err| matches!(err.failure, Failure::TimedOut(_)))
    }

    /// Returns `true` if the root cause is a cancelled driver call.
    pub fn is_driver_cancelled(&self) -> bool {
        self.driver_error()
            .is_some_and(|err| matches!(err.failure, Failure::Cancelled))
    }

    /// The collection the failing driver call was made against.
    pub fn driver_entity(&self) -> Option<&str> {
        self.driver_error().map(|err| &*err.entity)
    }

    fn driver_error(&self) -> Option<&DriverError> {
        match self.root().kind() {
            super::ErrorKind::Driver(err) => Some(err),
            _ => None,
        }
    }
}
