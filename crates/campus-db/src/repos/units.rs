//! Unit repository.

use chrono::Utc;

use campus_core::entities::Unit;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_bool, get_opt_string, is_unique_violation, parse_datetime};
use crate::service::CampusService;
use crate::updates::unit::UnitUpdate;

const UNIT_COLUMNS: &str =
    "id, course_id, instructor_id, title, overview, is_active, created_at, updated_at";

fn row_to_unit(row: &libsql::Row) -> Result<Unit, DatabaseError> {
    Ok(Unit {
        id: row.get::<i64>(0)?,
        course_id: row.get::<i64>(1)?,
        instructor_id: row.get::<i64>(2)?,
        title: row.get::<String>(3)?,
        overview: get_opt_string(row, 4)?,
        is_active: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn duplicate_title(course_id: i64, title: &str) -> DatabaseError {
    DatabaseError::conflict(format!(
        "course {course_id} already has a unit titled '{title}'"
    ))
}

impl CampusService {
    /// Create a unit in a course. Titles are unique within a course.
    pub async fn create_unit(
        &self,
        course_id: i64,
        instructor_id: i64,
        title: &str,
        overview: Option<&str>,
    ) -> Result<Unit, DatabaseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DatabaseError::validation("unit title must not be empty"));
        }
        self.require(EntityType::Course, course_id).await?;
        self.require(EntityType::User, instructor_id).await?;

        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO units (course_id, instructor_id, title, overview, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6) RETURNING id",
                libsql::params![
                    course_id,
                    instructor_id,
                    title,
                    overview,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_title(course_id, title)),
            Err(e) => return Err(e.into()),
        };

        self.emit(WriteEvent::created(EntityType::Unit, id).with_parent(EntityType::Course, course_id))
            .await?;

        Ok(Unit {
            id,
            course_id,
            instructor_id,
            title: title.to_string(),
            overview: overview.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_unit(&self, id: i64) -> Result<Unit, DatabaseError> {
        let sql = format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Unit, id))?;
        row_to_unit(&row)
    }

    /// List units, optionally restricted to a course and/or an instructor.
    pub async fn list_units(
        &self,
        course_id: Option<i64>,
        instructor_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Unit>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(course_id) = course_id {
            params.push(course_id.into());
            conditions.push(format!("course_id = ?{}", params.len()));
        }
        if let Some(instructor_id) = instructor_id {
            params.push(instructor_id.into());
            conditions.push(format!("instructor_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {UNIT_COLUMNS} FROM units {where_clause} ORDER BY id LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut units = Vec::new();
        while let Some(row) = rows.next().await? {
            units.push(row_to_unit(&row)?);
        }
        Ok(units)
    }

    /// Apply a partial update. A new title must not be used by another unit
    /// of the same course.
    pub async fn update_unit(&self, id: i64, update: UnitUpdate) -> Result<Unit, DatabaseError> {
        let unit = self.get_unit(id).await?;

        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(DatabaseError::validation("unit title must not be empty"));
            }
            let taken = self
                .count(
                    "SELECT COUNT(*) FROM units WHERE course_id = ?1 AND title = ?2 AND id != ?3",
                    libsql::params![unit.course_id, title, id],
                )
                .await?;
            if taken > 0 {
                return Err(duplicate_title(unit.course_id, title));
            }
            sets.push("title", title);
        }
        if let Some(ref overview) = update.overview {
            sets.push("overview", overview.as_deref());
        }
        if let Some(instructor_id) = update.instructor_id {
            self.require(EntityType::User, instructor_id).await?;
            sets.push("instructor_id", instructor_id);
        }
        if let Some(active) = update.is_active {
            sets.push("is_active", i64::from(active));
        }
        if sets.is_empty() {
            return Ok(unit);
        }

        let (sql, params) = sets.into_sql("units", id, Utc::now());
        match self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(duplicate_title(
                    unit.course_id,
                    update.title.as_deref().unwrap_or_default().trim(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        self.emit(
            WriteEvent::updated(EntityType::Unit, id)
                .with_parent(EntityType::Course, unit.course_id)
                .with_detail(&update),
        )
        .await?;
        self.get_unit(id).await
    }

    pub async fn set_unit_active(&self, id: i64, active: bool) -> Result<Unit, DatabaseError> {
        let unit = self.get_unit(id).await?;
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE units SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(active), now.to_rfc3339(), id],
            )
            .await?;

        self.emit(
            WriteEvent::updated(EntityType::Unit, id)
                .with_parent(EntityType::Course, unit.course_id)
                .with_detail(&serde_json::json!({ "is_active": active })),
        )
        .await?;
        self.get_unit(id).await
    }

    pub async fn delete_unit(&self, id: i64) -> Result<(), DatabaseError> {
        let unit = self.get_unit(id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM units WHERE id = ?1", [id])
            .await?;
        self.emit(WriteEvent::deleted(EntityType::Unit, id).with_parent(EntityType::Course, unit.course_id))
            .await
    }
}
