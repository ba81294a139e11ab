//! The error type shared by every reader and writer.

use std::io;

use thiserror::Error;

use gpml_core::{identifier::ElementId, model::ModelError};

/// A type alias for `Result<T, ConverterError>`.
pub type Result<T> = std::result::Result<T, ConverterError>;

/// A failure that aborts a read or write.
#[derive(Debug, Error)]
pub enum ConverterError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingRequiredAttribute { element: String, attribute: String },

    #[error("malformed value `{value}` for `{attribute}` on <{element}>: {reason}")]
    MalformedValue {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },

    #[error("{kind} `{element_id}` needs {requirement}")]
    UnresolvedRequiredReference {
        kind: String,
        element_id: ElementId,
        requirement: String,
    },

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("unknown document format: {0}")]
    UnknownFormat(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConverterError {
    pub(crate) fn missing(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub(crate) fn malformed(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_convert() {
        let err: ConverterError = ModelError::DuplicateId(ElementId::new("ce_dup")).into();
        assert!(matches!(err, ConverterError::Model(ModelError::DuplicateId(_))));
        assert_eq!(err.to_string(), "duplicate element id `ce_dup`");
    }

    #[test]
    fn test_malformed_message() {
        let err = ConverterError::malformed("Graphics", "centerX", "abc", "not a number");
        assert_eq!(
            err.to_string(),
            "malformed value `abc` for `centerX` on <Graphics>: not a number"
        );
    }
}
