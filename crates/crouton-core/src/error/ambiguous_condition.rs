use super::Error;

/// Error when a comparison cannot be oriented against the statement's
/// parameters.
///
/// This occurs when:
/// - Both sides of a comparison reference the statement's own parameter
/// - Neither side references it (e.g. comparing two constants)
/// - A join condition does not pair the left parameter with the related one
#[derive(Debug)]
pub(super) struct AmbiguousCondition {
    message: Box<str>,
}

impl std::error::Error for AmbiguousCondition {}

impl core::fmt::Display for AmbiguousCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "ambiguous condition: {}", self.message)
    }
}

impl Error {
    /// Creates an ambiguous condition error.
    pub fn ambiguous_condition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AmbiguousCondition(AmbiguousCondition {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an ambiguous condition error.
    pub fn is_ambiguous_condition(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::AmbiguousCondition(_)))
    }
}
