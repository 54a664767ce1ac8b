//! Assignment repository.
//!
//! At most one active assignment per (unit, title). The explicit check gives
//! a readable conflict; the partial unique index catches the race.

use chrono::{DateTime, Utc};

use campus_core::entities::Assignment;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{
    SetClauses, get_bool, get_opt_string, is_unique_violation, parse_datetime,
    parse_optional_datetime,
};
use crate::service::CampusService;
use crate::updates::assignment::AssignmentUpdate;

const ASSIGNMENT_COLUMNS: &str =
    "id, unit_id, title, description, due_date, file_path, is_active, created_at, updated_at";

fn row_to_assignment(row: &libsql::Row) -> Result<Assignment, DatabaseError> {
    Ok(Assignment {
        id: row.get::<i64>(0)?,
        unit_id: row.get::<i64>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        due_date: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        file_path: get_opt_string(row, 5)?,
        is_active: get_bool(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn duplicate_title(title: &str) -> DatabaseError {
    DatabaseError::conflict(format!(
        "an active assignment titled '{title}' already exists in this unit"
    ))
}

impl CampusService {
    pub async fn create_assignment(
        &self,
        unit_id: i64,
        title: &str,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
        file_path: Option<&str>,
    ) -> Result<Assignment, DatabaseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DatabaseError::validation("assignment title must not be empty"));
        }
        self.require(EntityType::Unit, unit_id).await?;
        if self.active_title_taken(unit_id, title, None).await? {
            return Err(duplicate_title(title));
        }

        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO assignments (unit_id, title, description, due_date, file_path, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7) RETURNING id",
                libsql::params![
                    unit_id,
                    title,
                    description,
                    due_date.map(|d| d.to_rfc3339()),
                    file_path,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_title(title)),
            Err(e) => return Err(e.into()),
        };

        self.emit(WriteEvent::created(EntityType::Assignment, id).with_parent(EntityType::Unit, unit_id))
            .await?;

        Ok(Assignment {
            id,
            unit_id,
            title: title.to_string(),
            description: description.map(String::from),
            due_date,
            file_path: file_path.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up an assignment without failing when it is absent.
    pub async fn find_assignment(&self, id: i64) -> Result<Option<Assignment>, DatabaseError> {
        let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_assignment(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_assignment(&self, id: i64) -> Result<Assignment, DatabaseError> {
        self.find_assignment(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Assignment, id))
    }

    /// Active assignments of a unit, earliest due first (undated last).
    pub async fn list_assignments(&self, unit_id: i64) -> Result<Vec<Assignment>, DatabaseError> {
        self.require(EntityType::Unit, unit_id).await?;
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
             WHERE unit_id = ?1 AND is_active = 1
             ORDER BY due_date IS NULL, due_date, id"
        );
        let mut rows = self.db().conn().query(&sql, [unit_id]).await?;

        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(row_to_assignment(&row)?);
        }
        Ok(assignments)
    }

    pub async fn update_assignment(
        &self,
        id: i64,
        update: AssignmentUpdate,
    ) -> Result<Assignment, DatabaseError> {
        let assignment = self.get_assignment(id).await?;

        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(DatabaseError::validation("assignment title must not be empty"));
            }
            if assignment.is_active
                && self
                    .active_title_taken(assignment.unit_id, title, Some(id))
                    .await?
            {
                return Err(duplicate_title(title));
            }
            sets.push("title", title);
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(due_date) = update.due_date {
            sets.push("due_date", due_date.map(|d| d.to_rfc3339()));
        }
        if let Some(ref file_path) = update.file_path {
            sets.push("file_path", file_path.as_deref());
        }
        if sets.is_empty() {
            return Ok(assignment);
        }

        let (sql, params) = sets.into_sql("assignments", id, Utc::now());
        match self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(duplicate_title(update.title.as_deref().unwrap_or_default()));
            }
            Err(e) => return Err(e.into()),
        }

        self.emit(
            WriteEvent::updated(EntityType::Assignment, id)
                .with_parent(EntityType::Unit, assignment.unit_id)
                .with_detail(&update),
        )
        .await?;
        self.get_assignment(id).await
    }

    /// Flip `is_active`. Reactivating fails if another active assignment in
    /// the unit has taken the title.
    pub async fn toggle_assignment(&self, id: i64) -> Result<Assignment, DatabaseError> {
        let assignment = self.get_assignment(id).await?;
        let active = !assignment.is_active;
        if active
            && self
                .active_title_taken(assignment.unit_id, &assignment.title, Some(id))
                .await?
        {
            return Err(duplicate_title(&assignment.title));
        }

        let now = Utc::now();
        match self
            .db()
            .conn()
            .execute(
                "UPDATE assignments SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(active), now.to_rfc3339(), id],
            )
            .await
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(duplicate_title(&assignment.title)),
            Err(e) => return Err(e.into()),
        }

        self.emit(
            WriteEvent::updated(EntityType::Assignment, id)
                .with_parent(EntityType::Unit, assignment.unit_id)
                .with_detail(&serde_json::json!({ "is_active": active })),
        )
        .await?;
        self.get_assignment(id).await
    }

    /// Delete an assignment and, through cascades, its submissions.
    pub async fn delete_assignment(&self, id: i64) -> Result<(), DatabaseError> {
        let assignment = self.get_assignment(id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM assignments WHERE id = ?1", [id])
            .await?;
        self.emit(
            WriteEvent::deleted(EntityType::Assignment, id)
                .with_parent(EntityType::Unit, assignment.unit_id),
        )
        .await
    }

    async fn active_title_taken(
        &self,
        unit_id: i64,
        title: &str,
        except: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let count = self
            .count(
                "SELECT COUNT(*) FROM assignments
                 WHERE unit_id = ?1 AND title = ?2 AND is_active = 1 AND id != ?3",
                libsql::params![unit_id, title, except.unwrap_or(0)],
            )
            .await?;
        Ok(count > 0)
    }
}
