//! # campus-db
//!
//! libSQL persistence for Campus.
//!
//! Holds all relational state (users, courses, units, notes, flashcards,
//! questions, answers, votes, assignments, submissions, grades) and the
//! activity log. The two rule-heavy operations live here as repository
//! methods over the policy functions in `campus-core`:
//!
//! - the vote ledger (`repos::votes`): cast, remove, tally, rank
//! - the submission gate (`repos::submissions`): `evaluate_and_submit`
//!
//! Every mutation emits a [`events::WriteEvent`] after it lands.

pub mod error;
pub mod events;
pub mod helpers;
pub mod journal;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;
pub mod uploads;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection. Foreign keys are
/// enabled on the connection so cascades (answer → votes, assignment →
/// submissions) happen immediately.
pub struct CampusDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CampusDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be set per connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let campus_db = Self { db, conn };
        campus_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(campus_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
