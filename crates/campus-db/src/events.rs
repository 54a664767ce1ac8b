//! Write events emitted by the persistence layer.
//!
//! Every repository mutation ends with [`CampusService::emit`]. Emission runs
//! three consumers in order:
//!
//! 1. the parent toucher, which bumps the parent row's `updated_at`
//!    (unit → course, note/assignment → unit, flashcard → note,
//!    answer → question, submission → assignment). Grades have no parent:
//!    a submission row is never changed after it is recorded.
//! 2. the activity recorder, which appends to `activity_logs`
//! 3. registered [`WriteObserver`]s, such as the JSONL [`crate::journal::EventJournal`]
//!
//! Vote events skip the activity recorder: a vote cast writes exactly one
//! `votes` row and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::enums::{EntityType, WriteOp};

use crate::error::DatabaseError;
use crate::helpers::entity_type_to_table;
use crate::service::CampusService;

/// Reference to the row whose `updated_at` a child write bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub entity: EntityType,
    pub id: i64,
}

/// One insert, update, or delete that reached the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteEvent {
    pub entity: EntityType,
    pub id: i64,
    pub op: WriteOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

impl WriteEvent {
    #[must_use]
    pub fn new(entity: EntityType, id: i64, op: WriteOp) -> Self {
        Self {
            entity,
            id,
            op,
            parent: None,
            detail: None,
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn created(entity: EntityType, id: i64) -> Self {
        Self::new(entity, id, WriteOp::Created)
    }

    #[must_use]
    pub fn updated(entity: EntityType, id: i64) -> Self {
        Self::new(entity, id, WriteOp::Updated)
    }

    #[must_use]
    pub fn deleted(entity: EntityType, id: i64) -> Self {
        Self::new(entity, id, WriteOp::Deleted)
    }

    #[must_use]
    pub const fn with_parent(mut self, entity: EntityType, id: i64) -> Self {
        self.parent = Some(ParentRef { entity, id });
        self
    }

    /// Attach a JSON detail payload. Serialization failures drop the detail.
    #[must_use]
    pub fn with_detail(mut self, detail: &impl Serialize) -> Self {
        self.detail = serde_json::to_value(detail).ok();
        self
    }
}

/// External consumer of write events.
///
/// Observers run after the write has landed, so a failing observer is
/// logged and does not fail the operation.
pub trait WriteObserver: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the observer could not record the event.
    fn on_write(&self, event: &WriteEvent) -> Result<(), DatabaseError>;
}

impl CampusService {
    /// Dispatch a write event to the built-in consumers and all observers.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if touching the parent or recording activity fails.
    pub async fn emit(&self, event: WriteEvent) -> Result<(), DatabaseError> {
        tracing::debug!(
            entity = %event.entity,
            id = event.id,
            op = %event.op,
            "write event"
        );

        if let Some(parent) = event.parent {
            self.touch_parent(parent, event.at).await?;
        }
        if event.entity != EntityType::Vote {
            self.record_activity(&event).await?;
        }
        for observer in self.observers() {
            if let Err(e) = observer.on_write(&event) {
                tracing::warn!(observer = observer.name(), "write observer failed: {e}");
            }
        }
        Ok(())
    }

    async fn touch_parent(&self, parent: ParentRef, at: DateTime<Utc>) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} SET updated_at = ?1 WHERE id = ?2",
            entity_type_to_table(parent.entity)
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params![at.to_rfc3339(), parent.id])
            .await?;
        Ok(())
    }

    async fn record_activity(&self, event: &WriteEvent) -> Result<(), DatabaseError> {
        let detail = event.detail.as_ref().map(ToString::to_string);
        self.db()
            .conn()
            .execute(
                "INSERT INTO activity_logs (entity_type, entity_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    event.entity.as_str(),
                    event.id,
                    event.op.as_str(),
                    detail,
                    event.at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }
}
