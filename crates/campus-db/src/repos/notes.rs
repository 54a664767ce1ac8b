//! Note repository.

use chrono::Utc;

use campus_core::entities::Note;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_bool, get_opt_string, parse_datetime};
use crate::service::CampusService;
use crate::updates::note::NoteUpdate;

const NOTE_COLUMNS: &str =
    "id, unit_id, uploaded_by, content, file_path, is_active, created_at, updated_at";

fn row_to_note(row: &libsql::Row) -> Result<Note, DatabaseError> {
    Ok(Note {
        id: row.get::<i64>(0)?,
        unit_id: row.get::<i64>(1)?,
        uploaded_by: row.get::<Option<i64>>(2)?,
        content: get_opt_string(row, 3)?,
        file_path: get_opt_string(row, 4)?,
        is_active: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Note files must be PDFs.
fn check_note_file(file_path: &str) -> Result<(), DatabaseError> {
    let is_pdf = file_path
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(DatabaseError::validation("note files must be PDFs"))
    }
}

impl CampusService {
    /// Create a note in a unit. A note needs text content, a file, or both.
    /// Content and file are each unique within a unit.
    pub async fn create_note(
        &self,
        unit_id: i64,
        uploaded_by: Option<i64>,
        content: Option<&str>,
        file_path: Option<&str>,
    ) -> Result<Note, DatabaseError> {
        let content = content.filter(|c| !c.trim().is_empty());
        let file_path = file_path.filter(|p| !p.trim().is_empty());
        if content.is_none() && file_path.is_none() {
            return Err(DatabaseError::validation(
                "a note needs text content or a file",
            ));
        }
        if let Some(path) = file_path {
            check_note_file(path)?;
        }
        self.require(EntityType::Unit, unit_id).await?;
        if let Some(user_id) = uploaded_by {
            self.require(EntityType::User, user_id).await?;
        }
        self.check_note_unique(unit_id, content, file_path, None).await?;

        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO notes (unit_id, uploaded_by, content, file_path, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6) RETURNING id",
                libsql::params![
                    unit_id,
                    uploaded_by,
                    content,
                    file_path,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?
            .ok_or(DatabaseError::NoResult)?;

        self.emit(WriteEvent::created(EntityType::Note, id).with_parent(EntityType::Unit, unit_id))
            .await?;

        Ok(Note {
            id,
            unit_id,
            uploaded_by,
            content: content.map(String::from),
            file_path: file_path.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, DatabaseError> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Note, id))?;
        row_to_note(&row)
    }

    /// Notes of a unit, newest first.
    pub async fn list_notes(&self, unit_id: i64, limit: u32) -> Result<Vec<Note>, DatabaseError> {
        self.require(EntityType::Unit, unit_id).await?;
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE unit_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );
        let mut rows = self.db().conn().query(&sql, [unit_id]).await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(row_to_note(&row)?);
        }
        Ok(notes)
    }

    /// Replace content or file, or move the note to another unit or uploader.
    pub async fn update_note(&self, id: i64, update: NoteUpdate) -> Result<Note, DatabaseError> {
        let note = self.get_note(id).await?;

        let content = update
            .content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        if update.content.is_some() && content.is_none() {
            return Err(DatabaseError::validation("note content must not be blank"));
        }
        if let Some(ref path) = update.file_path {
            check_note_file(path)?;
        }
        if let Some(unit_id) = update.unit_id {
            self.require(EntityType::Unit, unit_id).await?;
        }
        if let Some(user_id) = update.uploaded_by {
            self.require(EntityType::User, user_id).await?;
        }
        let unit_id = update.unit_id.unwrap_or(note.unit_id);
        self.check_note_unique(
            unit_id,
            content.or(note.content.as_deref()),
            update.file_path.as_deref().or(note.file_path.as_deref()),
            Some(id),
        )
        .await?;

        let mut sets = SetClauses::new();
        if let Some(content) = content {
            sets.push("content", content);
        }
        if let Some(ref path) = update.file_path {
            sets.push("file_path", path.as_str());
        }
        if let Some(unit_id) = update.unit_id {
            sets.push("unit_id", unit_id);
        }
        if let Some(user_id) = update.uploaded_by {
            sets.push("uploaded_by", user_id);
        }
        if sets.is_empty() {
            return Ok(note);
        }

        let (sql, params) = sets.into_sql("notes", id, Utc::now());
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.emit(
            WriteEvent::updated(EntityType::Note, id)
                .with_parent(EntityType::Unit, unit_id)
                .with_detail(&update),
        )
        .await?;
        self.get_note(id).await
    }

    /// Conflict if another note in `unit_id` already has this content or file.
    async fn check_note_unique(
        &self,
        unit_id: i64,
        content: Option<&str>,
        file_path: Option<&str>,
        except: Option<i64>,
    ) -> Result<(), DatabaseError> {
        let except = except.unwrap_or(0);
        if let Some(content) = content {
            let taken = self
                .count(
                    "SELECT COUNT(*) FROM notes WHERE unit_id = ?1 AND content = ?2 AND id != ?3",
                    libsql::params![unit_id, content, except],
                )
                .await?;
            if taken > 0 {
                return Err(DatabaseError::conflict(format!(
                    "unit {unit_id} already has a note with the same content"
                )));
            }
        }
        if let Some(path) = file_path {
            let taken = self
                .count(
                    "SELECT COUNT(*) FROM notes WHERE unit_id = ?1 AND file_path = ?2 AND id != ?3",
                    libsql::params![unit_id, path, except],
                )
                .await?;
            if taken > 0 {
                return Err(DatabaseError::conflict(format!(
                    "unit {unit_id} already has a note with the file '{path}'"
                )));
            }
        }
        Ok(())
    }

    pub async fn set_note_active(&self, id: i64, active: bool) -> Result<Note, DatabaseError> {
        let note = self.get_note(id).await?;
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE notes SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(active), now.to_rfc3339(), id],
            )
            .await?;

        self.emit(
            WriteEvent::updated(EntityType::Note, id)
                .with_parent(EntityType::Unit, note.unit_id)
                .with_detail(&serde_json::json!({ "is_active": active })),
        )
        .await?;
        self.get_note(id).await
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), DatabaseError> {
        let note = self.get_note(id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM notes WHERE id = ?1", [id])
            .await?;
        self.emit(WriteEvent::deleted(EntityType::Note, id).with_parent(EntityType::Unit, note.unit_id))
            .await
    }
}
