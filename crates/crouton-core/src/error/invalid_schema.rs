use super::Error;

/// Error when a model declaration cannot be turned into a descriptor.
///
/// This occurs when:
/// - A model declares no primary key, or more than one
/// - A relation's foreign key cannot be inferred (zero candidates)
/// - A relation's foreign key is ambiguous (several candidates)
/// - A navigation member does not name a relation of the model
///
/// These indicate a modeling mistake and are not recoverable by the caller.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// The model declares no primary key column.
    pub fn missing_primary_key(model: &str) -> Error {
        Error::invalid_schema(format!("model `{model}` does not declare a primary key"))
    }

    /// No foreign key candidate exists for the relation.
    pub fn missing_foreign_key(model: &str, member: &str) -> Error {
        Error::invalid_schema(format!(
            "relation `{model}::{member}` has no foreign key; declare one explicitly"
        ))
    }

    /// More than one foreign key candidate exists for the relation.
    pub fn ambiguous_foreign_key(model: &str, member: &str, candidates: &[String]) -> Error {
        Error::invalid_schema(format!(
            "relation `{model}::{member}` has more than one foreign key candidate ({}); \
             declare one explicitly",
            candidates.join(", ")
        ))
    }

    /// The navigation member does not name a relation of the model.
    pub fn unresolvable_relation(model: &str, member: &str) -> Error {
        Error::invalid_schema(format!("model `{model}` has no relation named `{member}`"))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
