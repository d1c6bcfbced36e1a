use super::Error;

/// Error when a predicate uses an expression shape the condition compiler
/// cannot translate.
///
/// Only comparisons, conjunctions, member paths and set membership compile.
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    message: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported expression: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported expression error.
    pub fn unsupported_expression(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(
            UnsupportedExpression {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedExpression(_)))
    }
}
