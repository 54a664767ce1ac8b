//! Row-to-entity parsing helpers and small SQL utilities.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity structs.
//! Timestamps written by Campus are RFC 3339; rows that relied on the column
//! default carry `SQLite`'s `datetime('now')` format instead, so both are accepted.

use chrono::{DateTime, Utc};

use campus_core::enums::EntityType;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is neither RFC 3339 nor
/// `YYYY-MM-DD HH:MM:SS`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all campus-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER flag column (`0`/`1`).
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a non-negative INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value is negative or too large.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    u32::try_from(value)
        .map_err(|_| DatabaseError::Query(format!("column {idx}: {value} is not a valid count")))
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Whether a libSQL error is a UNIQUE constraint violation.
///
/// libSQL surfaces constraint failures as `SqliteFailure` with the message
/// text from `SQLite`, so the check is on the message.
#[must_use]
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Whether a libSQL error is a CHECK constraint violation.
#[must_use]
pub fn is_check_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("CHECK constraint failed")
}

/// Map `EntityType` to the corresponding SQL table name.
///
/// Exhaustive match: adding a new `EntityType` variant forces updating this.
#[must_use]
pub const fn entity_type_to_table(entity: EntityType) -> &'static str {
    match entity {
        EntityType::User => "users",
        EntityType::Course => "courses",
        EntityType::Unit => "units",
        EntityType::Note => "notes",
        EntityType::Flashcard => "flashcards",
        EntityType::Question => "questions",
        EntityType::Answer => "answers",
        EntityType::Vote => "votes",
        EntityType::Assignment => "assignments",
        EntityType::Submission => "submissions",
        EntityType::Grade => "grades",
    }
}

/// Accumulates `SET col = ?n` clauses for a dynamic UPDATE.
///
/// Only fields present in an update struct are pushed; `updated_at` and the
/// `WHERE id` parameter are appended by [`SetClauses::into_sql`].
#[derive(Debug, Default)]
pub struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish the statement for `table`, stamping `updated_at` with `now`.
    #[must_use]
    pub fn into_sql(
        mut self,
        table: &str,
        id: i64,
        now: DateTime<Utc>,
    ) -> (String, Vec<libsql::Value>) {
        self.push("updated_at", now.to_rfc3339());
        self.params.push(id.into());
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::enums::{UserRole, VoteType};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn optional_datetime_treats_empty_as_none() {
        assert!(parse_optional_datetime(None).unwrap().is_none());
        assert!(parse_optional_datetime(Some("")).unwrap().is_none());
        assert!(
            parse_optional_datetime(Some("2026-02-09 14:30:00"))
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn parses_enums_from_storage_strings() {
        let role: UserRole = parse_enum("instructor").unwrap();
        assert_eq!(role, UserRole::Instructor);
        let vote: VoteType = parse_enum("down").unwrap();
        assert_eq!(vote, VoteType::Down);
        assert!(parse_enum::<VoteType>("sideways").is_err());
    }

    #[test]
    fn optional_json() {
        assert!(parse_optional_json(None).unwrap().is_none());
        assert_eq!(
            parse_optional_json(Some(r#"{"attempt":2}"#)).unwrap(),
            Some(serde_json::json!({"attempt": 2}))
        );
        assert!(parse_optional_json(Some("{not json")).is_err());
    }

    #[test]
    fn set_clauses_number_params_in_order() {
        let mut sets = SetClauses::new();
        assert!(sets.is_empty());
        sets.push("title", "New title");
        sets.push("body", Option::<&str>::None);
        let now = Utc::now();
        let (sql, params) = sets.into_sql("questions", 7, now);
        assert_eq!(
            sql,
            "UPDATE questions SET title = ?1, body = ?2, updated_at = ?3 WHERE id = ?4"
        );
        assert_eq!(params.len(), 4);
        assert!(matches!(params[3], libsql::Value::Integer(7)));
    }

    #[test]
    fn table_names() {
        assert_eq!(entity_type_to_table(EntityType::Vote), "votes");
        assert_eq!(entity_type_to_table(EntityType::Submission), "submissions");
    }
}
