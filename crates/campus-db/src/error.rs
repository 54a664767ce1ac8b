//! Database error types for campus-db.

use campus_core::enums::EntityType;
use campus_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A domain error (validation, not found, conflict, permission).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Upload or journal file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Validation(msg.into()))
    }

    #[must_use]
    pub const fn not_found(entity_type: EntityType, id: i64) -> Self {
        Self::Core(CoreError::not_found(entity_type, id))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Conflict(msg.into()))
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Permission(msg.into()))
    }

    /// Classify this error. Everything that is not a domain error is `Storage`.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            _ => ErrorKind::Storage,
        }
    }
}
