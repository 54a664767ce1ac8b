//! Service layer: the database handle plus upload storage and write observers.
//!
//! `CampusService` wraps `CampusDb` (raw database access), `UploadStore`
//! (submission files), and the registered `WriteObserver`s. All repository
//! methods are implemented as `impl CampusService` blocks in `repos/`.
//!
//! Every mutation method follows this protocol:
//! 1. Check referenced rows exist (domain errors come back as `DatabaseError::Core`)
//! 2. Execute SQL, letting UNIQUE/CHECK constraints settle races
//! 3. Emit a `WriteEvent`

use std::path::PathBuf;

use campus_core::enums::EntityType;

use crate::CampusDb;
use crate::error::DatabaseError;
use crate::events::WriteObserver;
use crate::helpers::entity_type_to_table;
use crate::journal::EventJournal;
use crate::uploads::UploadStore;

pub struct CampusService {
    db: CampusDb,
    uploads: UploadStore,
    observers: Vec<Box<dyn WriteObserver>>,
}

impl CampusService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `upload_dir` - Directory for submission files. `None` disables file writes.
    /// * `journal_dir` - Directory for the JSONL event journal. `None` disables it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or a directory
    /// cannot be created.
    pub async fn new_local(
        db_path: &str,
        upload_dir: Option<PathBuf>,
        journal_dir: Option<PathBuf>,
    ) -> Result<Self, DatabaseError> {
        let db = CampusDb::open_local(db_path).await?;
        let uploads = match upload_dir {
            Some(dir) => UploadStore::new(dir)?,
            None => UploadStore::disabled(),
        };
        let mut service = Self::from_db(db, uploads);
        if let Some(dir) = journal_dir {
            service = service.with_observer(EventJournal::new(dir)?);
        }
        Ok(service)
    }

    /// Create from an existing `CampusDb`.
    #[must_use]
    pub fn from_db(db: CampusDb, uploads: UploadStore) -> Self {
        Self {
            db,
            uploads,
            observers: Vec::new(),
        }
    }

    /// Register an observer for write events.
    #[must_use]
    pub fn with_observer(mut self, observer: impl WriteObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    #[must_use]
    pub const fn db(&self) -> &CampusDb {
        &self.db
    }

    #[must_use]
    pub const fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub(crate) fn observers(&self) -> impl Iterator<Item = &dyn WriteObserver> {
        self.observers.iter().map(|observer| observer.as_ref())
    }

    /// Whether a row with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn exists(&self, entity: EntityType, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE id = ?1",
            entity_type_to_table(entity)
        );
        let mut rows = self.db.conn().query(&sql, [id]).await?;
        Ok(rows.next().await?.is_some())
    }

    /// Fail with `NotFound` unless a row with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core(NotFound)` for a missing row.
    pub async fn require(&self, entity: EntityType, id: i64) -> Result<(), DatabaseError> {
        if self.exists(entity, id).await? {
            Ok(())
        } else {
            Err(DatabaseError::not_found(entity, id))
        }
    }

    /// Run an `INSERT ... RETURNING id` statement.
    ///
    /// Returns `None` when the insert was skipped (`ON CONFLICT DO NOTHING`).
    /// Constraint failures can surface on either the query or the first step,
    /// so both are returned as the raw `libsql::Error` for the caller to classify.
    pub(crate) async fn insert_returning_id(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Option<i64>, libsql::Error> {
        let mut rows = self.db.conn().query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<i64>(0)?)),
            None => Ok(None),
        }
    }

    /// Run a `SELECT COUNT(*) ...` statement.
    pub(crate) async fn count(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u32, DatabaseError> {
        let mut rows = self.db.conn().query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        crate::helpers::get_u32(&row, 0)
    }
}
