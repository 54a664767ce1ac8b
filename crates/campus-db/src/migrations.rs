//! Schema setup.
//!
//! SQL files are embedded at compile time and applied in order every time a
//! database is opened. Each statement is `IF NOT EXISTS`, so re-applying a
//! migration to an existing file is a no-op.

use crate::CampusDb;
use crate::error::DatabaseError;

/// `(name, sql)` pairs, applied front to back.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    // 12 tables, 11 indexes. The UNIQUE/CHECK constraints on votes,
    // submissions and grades are what the repos rely on under concurrency.
    include_str!("../migrations/001_initial.sql"),
)];

impl CampusDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::trace!(migration = name, "applied");
        }
        Ok(())
    }
}
