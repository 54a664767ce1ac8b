//! Grade repository. One grade per submission.

use chrono::Utc;

use campus_core::entities::Grade;
use campus_core::enums::{EntityType, UserRole};

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_opt_string, is_check_violation, is_unique_violation, parse_datetime};
use crate::service::CampusService;
use crate::updates::grade::GradeUpdate;

const GRADE_COLUMNS: &str =
    "id, submission_id, instructor_id, score, feedback, created_at, updated_at";

fn row_to_grade(row: &libsql::Row) -> Result<Grade, DatabaseError> {
    Ok(Grade {
        id: row.get::<i64>(0)?,
        submission_id: row.get::<i64>(1)?,
        instructor_id: row.get::<i64>(2)?,
        score: row.get::<f64>(3)?,
        feedback: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn check_score(score: f64) -> Result<(), DatabaseError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(DatabaseError::validation(format!(
            "score must be between 0 and 100, got {score}"
        )))
    }
}

fn already_graded(submission_id: i64) -> DatabaseError {
    DatabaseError::conflict(format!("submission {submission_id} is already graded"))
}

impl CampusService {
    /// Grade a submission. Students cannot grade.
    pub async fn create_grade(
        &self,
        submission_id: i64,
        instructor_id: i64,
        score: f64,
        feedback: Option<&str>,
    ) -> Result<Grade, DatabaseError> {
        check_score(score)?;
        let submission = self.get_submission(submission_id).await?;
        let instructor = self.get_user(instructor_id).await?;
        if instructor.role == UserRole::Student {
            return Err(DatabaseError::permission("students cannot grade submissions"));
        }

        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO grades (submission_id, instructor_id, score, feedback, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    submission_id,
                    instructor_id,
                    score,
                    feedback,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) => return Err(already_graded(submission_id)),
            Err(e) => return Err(e.into()),
        };

        self.emit(
            WriteEvent::created(EntityType::Grade, id).with_detail(&serde_json::json!({
                "submission_id": submission.id,
                "score": score,
            })),
        )
        .await?;

        Ok(Grade {
            id,
            submission_id,
            instructor_id,
            score,
            feedback: feedback.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_grade(&self, id: i64) -> Result<Grade, DatabaseError> {
        let sql = format!("SELECT {GRADE_COLUMNS} FROM grades WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Grade, id))?;
        row_to_grade(&row)
    }

    /// The grade for a submission, or `None` if it has not been graded yet.
    pub async fn get_grade_for_submission(
        &self,
        submission_id: i64,
    ) -> Result<Option<Grade>, DatabaseError> {
        self.require(EntityType::Submission, submission_id).await?;
        let sql = format!("SELECT {GRADE_COLUMNS} FROM grades WHERE submission_id = ?1");
        let mut rows = self.db().conn().query(&sql, [submission_id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_grade(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_grades_by_instructor(
        &self,
        instructor_id: i64,
        limit: u32,
    ) -> Result<Vec<Grade>, DatabaseError> {
        let sql = format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE instructor_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );
        let mut rows = self.db().conn().query(&sql, [instructor_id]).await?;

        let mut grades = Vec::new();
        while let Some(row) = rows.next().await? {
            grades.push(row_to_grade(&row)?);
        }
        Ok(grades)
    }

    pub async fn update_grade(&self, id: i64, update: GradeUpdate) -> Result<Grade, DatabaseError> {
        let grade = self.get_grade(id).await?;

        let mut sets = SetClauses::new();
        if let Some(score) = update.score {
            check_score(score)?;
            sets.push("score", score);
        }
        if let Some(ref feedback) = update.feedback {
            sets.push("feedback", feedback.as_deref());
        }
        if sets.is_empty() {
            return Ok(grade);
        }

        let (sql, params) = sets.into_sql("grades", id, Utc::now());
        match self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
        {
            Ok(_) => {}
            Err(e) if is_check_violation(&e) => {
                return Err(DatabaseError::validation("score must be between 0 and 100"));
            }
            Err(e) => return Err(e.into()),
        }

        self.emit(
            WriteEvent::updated(EntityType::Grade, id).with_detail(&update),
        )
        .await?;
        self.get_grade(id).await
    }

    pub async fn delete_grade(&self, id: i64) -> Result<(), DatabaseError> {
        let grade = self.get_grade(id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM grades WHERE id = ?1", [id])
            .await?;
        self.emit(
            WriteEvent::deleted(EntityType::Grade, id)
                .with_detail(&serde_json::json!({ "submission_id": grade.submission_id })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_open_assignment, seed_student, test_service};
    use crate::updates::grade::GradeUpdateBuilder;
    use campus_core::entities::{Submission, User};
    use campus_core::errors::ErrorKind;
    use campus_core::gate::SubmissionPayload;
    use campus_core::responses::GateDecision;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn graded_setup(svc: &CampusService) -> (User, User, Submission) {
        let (_, assignment) = seed_open_assignment(svc).await;
        let instructor = svc.get_user_by_username("grace").await.unwrap().unwrap();
        let ada = seed_student(svc, "ada").await;
        let payload = SubmissionPayload {
            content: Some("My lab report".into()),
            file: None,
        };
        let decision = svc
            .evaluate_and_submit(ada.id, assignment.id, &payload, Utc::now())
            .await
            .unwrap();
        let GateDecision::Accepted(receipt) = decision else {
            panic!("expected acceptance: {decision:?}");
        };
        (instructor, ada, receipt.submission)
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let svc = test_service().await;
        let (instructor, _, submission) = graded_setup(&svc).await;

        assert!(svc.get_grade_for_submission(submission.id).await.unwrap().is_none());

        let grade = svc
            .create_grade(submission.id, instructor.id, 87.5, Some("Clear method"))
            .await
            .unwrap();
        assert_eq!(grade.score, 87.5);

        let fetched = svc.get_grade_for_submission(submission.id).await.unwrap();
        assert_eq!(fetched, Some(grade.clone()));
        assert_eq!(
            svc.list_grades_by_instructor(instructor.id, 10).await.unwrap(),
            vec![grade]
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[tokio::test]
    async fn score_out_of_range(#[case] score: f64) {
        let svc = test_service().await;
        let (instructor, _, submission) = graded_setup(&svc).await;
        let err = svc
            .create_grade(submission.id, instructor.id, score, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn one_grade_per_submission() {
        let svc = test_service().await;
        let (instructor, _, submission) = graded_setup(&svc).await;
        svc.create_grade(submission.id, instructor.id, 70.0, None)
            .await
            .unwrap();
        let err = svc
            .create_grade(submission.id, instructor.id, 90.0, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn students_and_unknowns_rejected() {
        let svc = test_service().await;
        let (instructor, ada, submission) = graded_setup(&svc).await;

        let err = svc
            .create_grade(submission.id, ada.id, 50.0, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permission);

        let err = svc.create_grade(999, instructor.id, 50.0, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = svc.create_grade(submission.id, 999, 50.0, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let svc = test_service().await;
        let (instructor, _, submission) = graded_setup(&svc).await;
        let grade = svc
            .create_grade(submission.id, instructor.id, 60.0, Some("Rough"))
            .await
            .unwrap();

        let updated = svc
            .update_grade(
                grade.id,
                GradeUpdateBuilder::new().score(75.0).feedback(None).build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.score, 75.0);
        assert_eq!(updated.feedback, None);

        let err = svc
            .update_grade(grade.id, GradeUpdateBuilder::new().score(101.0).build())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        svc.delete_grade(grade.id).await.unwrap();
        assert!(svc.get_grade_for_submission(submission.id).await.unwrap().is_none());
        assert_eq!(
            svc.delete_grade(grade.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn grading_leaves_submission_untouched() {
        let svc = test_service().await;
        let (instructor, _, submission) = graded_setup(&svc).await;
        svc.db()
            .conn()
            .execute(
                "UPDATE submissions SET updated_at = '2000-01-01 00:00:00' WHERE id = ?1",
                [submission.id],
            )
            .await
            .unwrap();

        let grade = svc
            .create_grade(submission.id, instructor.id, 80.0, None)
            .await
            .unwrap();
        svc.update_grade(grade.id, GradeUpdateBuilder::new().score(85.0).build())
            .await
            .unwrap();
        svc.delete_grade(grade.id).await.unwrap();

        let after = svc.get_submission(submission.id).await.unwrap();
        assert_eq!(after.updated_at.timestamp(), 946_684_800);
    }
}
