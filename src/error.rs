//! Error types for the REST dispatch layer.
//!
//! Every failure that can surface through the dispatcher is represented here.
//! Errors carry a stable wire-level kind name in addition to their message;
//! the HTTP error body is always `"<kind>: <message>"`.

use crate::model::FieldError;

/// Main error type for REST dispatch operations.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A resource-id path segment that failed integer parsing.
    #[error("id must be an integer")]
    InvalidId,

    /// A verb that requires an id was called without one.
    #[error("id is required")]
    MissingId,

    /// POST was called with a resource-id path segment.
    #[error("no arguments accepted for POST")]
    ArgumentNotAllowed,

    /// A persistent field's declared type is outside the supported set.
    #[error("{0} not supported")]
    UnsupportedType(&'static str),

    /// A template names a field the model does not declare.
    #[error("Incompatible template, field '{0}' does not exist in model")]
    IncompatibleTemplate(String),

    /// Applying an incoming value to a field failed. The original error kind
    /// is preserved so the wire body still names it.
    #[error("Error assigning '{field}': {message}")]
    FieldAssignment {
        field: String,
        kind: &'static str,
        message: String,
    },

    /// Request body parsing or response serialization failure.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by the datastore collaborator.
    #[error("{0}")]
    Datastore(String),
}

impl RestError {
    /// The error class name emitted in HTTP 400 bodies.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidId | Self::IncompatibleTemplate(_) | Self::Json(_) => "ValueError",
            Self::MissingId | Self::ArgumentNotAllowed => "KeyError",
            Self::UnsupportedType(_) => "TypeError",
            Self::FieldAssignment { kind, .. } => kind,
            Self::Datastore(_) => "RuntimeError",
        }
    }

    /// The full wire body for an error response.
    pub fn body(&self) -> String {
        format!("{}: {}", self.kind_name(), self)
    }

    /// Wrap a field-level failure with the name of the field being assigned,
    /// keeping the underlying error kind.
    pub fn assignment(field: impl Into<String>, error: FieldError) -> Self {
        Self::FieldAssignment {
            field: field.into(),
            kind: error.kind_name(),
            message: error.to_string(),
        }
    }
}

/// Result alias for REST dispatch operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bodies_carry_kind_names() {
        assert_eq!(
            RestError::InvalidId.body(),
            "ValueError: id must be an integer"
        );
        assert_eq!(RestError::MissingId.body(), "KeyError: id is required");
        assert_eq!(
            RestError::UnsupportedType("list").body(),
            "TypeError: list not supported"
        );
    }

    #[test]
    fn assignment_wrap_preserves_kind() {
        let inner = FieldError::WrongType {
            expected: "int",
            actual: "string",
        };
        let wrapped = RestError::assignment("order", inner);
        assert_eq!(wrapped.kind_name(), "TypeError");
        assert_eq!(
            wrapped.body(),
            "TypeError: Error assigning 'order': expected int, got string"
        );
    }
}
