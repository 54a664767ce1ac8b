//! Cross-cutting error taxonomy for Campus.
//!
//! Storage failures are defined in `campus-db` (`DatabaseError`), which wraps
//! `CoreError` for the domain cases. The CLI converges everything into `anyhow`.

use std::fmt;

use thiserror::Error;

use crate::enums::EntityType;

/// Errors that can be raised by any Campus crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or missing input. Recoverable by correcting the input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: EntityType, id: i64 },

    /// The request collides with existing state (duplicates, attempt limit).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller does not own the entity it tried to change.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    #[must_use]
    pub const fn not_found(entity_type: EntityType, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Permission(_) => ErrorKind::Permission,
            Self::Other(_) => ErrorKind::Storage,
        }
    }
}

/// Coarse error class, used by callers to pick a transport-level response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Permission,
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Permission => "permission",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found(EntityType::Answer, 42);
        assert_eq!(err.to_string(), "answer not found: 42");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn kinds_cover_taxonomy() {
        assert_eq!(
            CoreError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(CoreError::Conflict("x".into()).kind(), ErrorKind::Conflict);
        assert_eq!(
            CoreError::Permission("x".into()).kind(),
            ErrorKind::Permission
        );
        assert_eq!(
            CoreError::Other(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Storage
        );
    }
}
