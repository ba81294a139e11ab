//! Errors raised by model operations.

use thiserror::Error;

use crate::identifier::ElementId;

/// A violated model invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("duplicate element id `{0}`")]
    DuplicateId(ElementId),

    #[error("no element with id `{0}`")]
    NotFound(ElementId),

    #[error("line `{id}` has {points} point(s), at least 2 are required")]
    InvalidLine { id: ElementId, points: usize },

    #[error("group membership error: {0}")]
    GroupMembership(String),

    #[error("invalid reference from `{from}` to `{to}`: {reason}")]
    InvalidReference {
        from: String,
        to: ElementId,
        reason: String,
    },

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl ModelError {
    pub(crate) fn invalid_reference(
        from: impl ToString,
        to: ElementId,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidReference {
            from: from.to_string(),
            to,
            reason: reason.into(),
        }
    }
}
