use super::Error;

/// Error when a statement needs a dialect-specific rendering the serializer's
/// flavor does not provide.
#[derive(Debug)]
pub(super) struct MissingDialectHook {
    message: Box<str>,
}

impl std::error::Error for MissingDialectHook {}

impl core::fmt::Display for MissingDialectHook {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing dialect hook: {}", self.message)
    }
}

impl Error {
    /// Creates a missing dialect hook error.
    pub fn missing_dialect_hook(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingDialectHook(MissingDialectHook {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing dialect hook error.
    pub fn is_missing_dialect_hook(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingDialectHook(_)))
    }
}
