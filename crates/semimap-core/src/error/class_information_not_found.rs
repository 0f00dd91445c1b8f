use super::Error;

/// Error when no entity metadata is registered for a type or name.
#[derive(Debug)]
pub(super) struct ClassInformationNotFound {
    name: Box<str>,
}

impl std::error::Error for ClassInformationNotFound {}

impl core::fmt::Display for ClassInformationNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "class information not found: `{}` is not a registered entity",
            self.name
        )
    }
}

impl Error {
    /// Creates a class information not found error.
    ///
    /// `name` is the type name, simple name or entity name that was looked up.
    pub fn class_information_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ClassInformationNotFound(
            ClassInformationNotFound {
                name: name.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a class information not found error.
    pub fn is_class_information_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ClassInformationNotFound(_))
    }
}
