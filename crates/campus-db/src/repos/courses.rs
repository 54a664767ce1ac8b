//! Course repository.

use chrono::Utc;

use campus_core::entities::Course;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_bool, get_opt_string, parse_datetime};
use crate::service::CampusService;
use crate::updates::course::CourseUpdate;

const COURSE_COLUMNS: &str = "id, title, description, is_active, created_at, updated_at";

fn row_to_course(row: &libsql::Row) -> Result<Course, DatabaseError> {
    Ok(Course {
        id: row.get::<i64>(0)?,
        title: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        is_active: get_bool(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl CampusService {
    pub async fn create_course(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Course, DatabaseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DatabaseError::validation("course title must not be empty"));
        }

        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO courses (title, description, is_active, created_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?4) RETURNING id",
                libsql::params![title, description, now.to_rfc3339(), now.to_rfc3339()],
            )
            .await?
            .ok_or(DatabaseError::NoResult)?;

        self.emit(WriteEvent::created(EntityType::Course, id)).await?;

        Ok(Course {
            id,
            title: title.to_string(),
            description: description.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_course(&self, id: i64) -> Result<Course, DatabaseError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Course, id))?;
        row_to_course(&row)
    }

    pub async fn list_courses(
        &self,
        active_only: bool,
        limit: u32,
    ) -> Result<Vec<Course>, DatabaseError> {
        let filter = if active_only { "WHERE is_active = 1" } else { "" };
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses {filter} ORDER BY id LIMIT {limit}");
        let mut rows = self.db().conn().query(&sql, ()).await?;

        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            courses.push(row_to_course(&row)?);
        }
        Ok(courses)
    }

    pub async fn update_course(&self, id: i64, update: CourseUpdate) -> Result<Course, DatabaseError> {
        let course = self.get_course(id).await?;

        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(DatabaseError::validation("course title must not be empty"));
            }
            sets.push("title", title);
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if sets.is_empty() {
            return Ok(course);
        }

        let (sql, params) = sets.into_sql("courses", id, Utc::now());
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.emit(WriteEvent::updated(EntityType::Course, id).with_detail(&update))
            .await?;
        self.get_course(id).await
    }

    pub async fn set_course_active(&self, id: i64, active: bool) -> Result<Course, DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE courses SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(active), now.to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(EntityType::Course, id));
        }

        self.emit(
            WriteEvent::updated(EntityType::Course, id)
                .with_detail(&serde_json::json!({ "is_active": active })),
        )
        .await?;
        self.get_course(id).await
    }

    /// Delete a course and, through cascades, its units and their content.
    pub async fn delete_course(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM courses WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(DatabaseError::not_found(EntityType::Course, id));
        }
        self.emit(WriteEvent::deleted(EntityType::Course, id)).await
    }
}
