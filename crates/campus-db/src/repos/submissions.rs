//! Submission gate and submission queries.
//!
//! `evaluate_and_submit` reads a [`GateSnapshot`] (assignment, student,
//! taken attempt slots), runs the pure ordered checks in
//! `campus_core::gate::evaluate`, and only then writes.
//!
//! The slot read and the insert are not atomic. A racing request for the
//! same pair computes the same attempt index; the loser's insert fails
//! `UNIQUE(student_id, assignment_id, attempt)` (or `CHECK(attempt <= 3)`)
//! and is reported as `ATTEMPT_LIMIT_REACHED`.

use chrono::{DateTime, Utc};

use campus_core::entities::Submission;
use campus_core::enums::EntityType;
use campus_core::gate::{self, Attempt, GateRejection, GateSnapshot, SubmissionPayload};
use campus_core::responses::{GateDecision, SubmissionReceipt};

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{get_opt_string, get_u32, is_check_violation, is_unique_violation, parse_datetime};
use crate::service::CampusService;

const SUBMISSION_COLUMNS: &str =
    "id, student_id, assignment_id, attempt, content, file_path, created_at, updated_at";

fn row_to_submission(row: &libsql::Row) -> Result<Submission, DatabaseError> {
    Ok(Submission {
        id: row.get::<i64>(0)?,
        student_id: row.get::<i64>(1)?,
        assignment_id: row.get::<i64>(2)?,
        attempt: get_u32(row, 3)?,
        content: get_opt_string(row, 4)?,
        file_path: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl CampusService {
    /// Attempt numbers recorded for a (student, assignment) pair, ascending.
    pub async fn taken_attempts(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<u32>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT attempt FROM submissions
                 WHERE student_id = ?1 AND assignment_id = ?2 ORDER BY attempt",
                libsql::params![student_id, assignment_id],
            )
            .await?;

        let mut taken = Vec::new();
        while let Some(row) = rows.next().await? {
            taken.push(get_u32(&row, 0)?);
        }
        Ok(taken)
    }

    /// Decide whether a new attempt is allowed and, if so, record it.
    ///
    /// Rejections are returned as `Ok(GateDecision::Rejected(..))`; `Err` means
    /// storage failed.
    pub async fn evaluate_and_submit(
        &self,
        student_id: i64,
        assignment_id: i64,
        payload: &SubmissionPayload,
        now: DateTime<Utc>,
    ) -> Result<GateDecision, DatabaseError> {
        match self.admit(student_id, assignment_id, payload, now).await? {
            Ok(attempt) => self.commit(student_id, assignment_id, attempt, payload, now).await,
            Err(rejection) => {
                tracing::debug!(student_id, assignment_id, %rejection, "submission rejected");
                Ok(GateDecision::Rejected(rejection))
            }
        }
    }

    /// Read the gate snapshot and run the ordered checks. Writes nothing.
    async fn admit(
        &self,
        student_id: i64,
        assignment_id: i64,
        payload: &SubmissionPayload,
        now: DateTime<Utc>,
    ) -> Result<Result<Attempt, GateRejection>, DatabaseError> {
        let assignment = self.find_assignment(assignment_id).await?;
        let student_exists = self.exists(EntityType::User, student_id).await?;
        let taken = self.taken_attempts(student_id, assignment_id).await?;
        let snapshot = GateSnapshot {
            assignment: assignment.as_ref(),
            student_exists,
            taken_attempts: &taken,
        };
        Ok(gate::evaluate(&snapshot, payload, now))
    }

    /// Record an admitted attempt. A slot lost to a concurrent request is
    /// reported as `ATTEMPT_LIMIT_REACHED`.
    async fn commit(
        &self,
        student_id: i64,
        assignment_id: i64,
        attempt: Attempt,
        payload: &SubmissionPayload,
        now: DateTime<Utc>,
    ) -> Result<GateDecision, DatabaseError> {
        match self
            .record_attempt(student_id, assignment_id, attempt, payload, now)
            .await?
        {
            Some(submission) => {
                tracing::debug!(
                    student_id,
                    assignment_id,
                    attempt = attempt.number(),
                    "submission accepted"
                );
                Ok(GateDecision::Accepted(SubmissionReceipt::new(submission, attempt)))
            }
            None => Ok(GateDecision::Rejected(GateRejection::AttemptLimitReached)),
        }
    }

    /// Insert the attempt row, then store its file.
    ///
    /// Returns `None` when the attempt slot was taken by a concurrent request.
    /// If the file cannot be written the row is removed again.
    async fn record_attempt(
        &self,
        student_id: i64,
        assignment_id: i64,
        attempt: Attempt,
        payload: &SubmissionPayload,
        now: DateTime<Utc>,
    ) -> Result<Option<Submission>, DatabaseError> {
        let artifact = payload
            .file
            .as_ref()
            .map(|file| attempt.artifact_name(student_id, assignment_id, &file.filename));
        let file_path = artifact
            .as_deref()
            .map(|name| self.uploads().path_for(name).display().to_string());
        let content = payload.text();

        let inserted = self
            .insert_returning_id(
                "INSERT INTO submissions (student_id, assignment_id, attempt, content, file_path, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                libsql::params![
                    student_id,
                    assignment_id,
                    i64::from(attempt.number()),
                    content,
                    file_path.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) || is_check_violation(&e) => {
                tracing::warn!(
                    student_id,
                    assignment_id,
                    attempt = attempt.number(),
                    "attempt slot taken by a concurrent submission"
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if let (Some(name), Some(file)) = (artifact.as_deref(), payload.file.as_ref()) {
            if let Err(write_err) = self.uploads().write(name, &file.bytes) {
                if let Err(e) = self
                    .db()
                    .conn()
                    .execute("DELETE FROM submissions WHERE id = ?1", [id])
                    .await
                {
                    tracing::warn!(submission_id = id, "failed to remove orphaned submission: {e}");
                }
                return Err(write_err);
            }
        }

        self.emit(
            WriteEvent::created(EntityType::Submission, id)
                .with_parent(EntityType::Assignment, assignment_id)
                .with_detail(&serde_json::json!({ "attempt": attempt })),
        )
        .await?;

        Ok(Some(Submission {
            id,
            student_id,
            assignment_id,
            attempt: attempt.number(),
            content: content.map(String::from),
            file_path,
            created_at: now,
            updated_at: now,
        }))
    }

    pub async fn get_submission(&self, id: i64) -> Result<Submission, DatabaseError> {
        let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Submission, id))?;
        row_to_submission(&row)
    }

    /// One student's attempts at an assignment, in attempt order.
    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>, DatabaseError> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions
             WHERE assignment_id = ?1 AND student_id = ?2 ORDER BY attempt"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![assignment_id, student_id])
            .await?;

        let mut submissions = Vec::new();
        while let Some(row) = rows.next().await? {
            submissions.push(row_to_submission(&row)?);
        }
        Ok(submissions)
    }

    /// Every attempt at an assignment, grouped by student.
    pub async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>, DatabaseError> {
        self.require(EntityType::Assignment, assignment_id).await?;
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions
             WHERE assignment_id = ?1 ORDER BY student_id, attempt"
        );
        let mut rows = self.db().conn().query(&sql, [assignment_id]).await?;

        let mut submissions = Vec::new();
        while let Some(row) = rows.next().await? {
            submissions.push(row_to_submission(&row)?);
        }
        Ok(submissions)
    }
}
