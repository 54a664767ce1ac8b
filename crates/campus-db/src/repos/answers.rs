//! Answer repository.

use chrono::Utc;

use campus_core::entities::Answer;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_bool, parse_datetime};
use crate::service::CampusService;
use crate::updates::answer::AnswerUpdate;

const ANSWER_COLUMNS: &str = "id, question_id, author_id, body, is_best, created_at, updated_at";

fn row_to_answer(row: &libsql::Row) -> Result<Answer, DatabaseError> {
    Ok(Answer {
        id: row.get::<i64>(0)?,
        question_id: row.get::<i64>(1)?,
        author_id: row.get::<i64>(2)?,
        body: row.get::<String>(3)?,
        is_best: get_bool(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl CampusService {
    pub async fn create_answer(
        &self,
        question_id: i64,
        author_id: i64,
        body: &str,
    ) -> Result<Answer, DatabaseError> {
        if body.trim().is_empty() {
            return Err(DatabaseError::validation("answer body must not be empty"));
        }
        self.require(EntityType::Question, question_id).await?;
        self.require(EntityType::User, author_id).await?;

        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO answers (question_id, author_id, body, is_best, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?5) RETURNING id",
                libsql::params![question_id, author_id, body, now.to_rfc3339(), now.to_rfc3339()],
            )
            .await?
            .ok_or(DatabaseError::NoResult)?;

        self.emit(
            WriteEvent::created(EntityType::Answer, id).with_parent(EntityType::Question, question_id),
        )
        .await?;

        Ok(Answer {
            id,
            question_id,
            author_id,
            body: body.to_string(),
            is_best: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_answer(&self, id: i64) -> Result<Answer, DatabaseError> {
        let sql = format!("SELECT {ANSWER_COLUMNS} FROM answers WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Answer, id))?;
        row_to_answer(&row)
    }

    /// Answers to a question, newest first.
    pub async fn list_answers(&self, question_id: i64) -> Result<Vec<Answer>, DatabaseError> {
        self.require(EntityType::Question, question_id).await?;
        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = ?1
             ORDER BY created_at DESC, id DESC"
        );
        let mut rows = self.db().conn().query(&sql, [question_id]).await?;

        let mut answers = Vec::new();
        while let Some(row) = rows.next().await? {
            answers.push(row_to_answer(&row)?);
        }
        Ok(answers)
    }

    /// Edit an answer. Only its author may do so.
    pub async fn update_answer(
        &self,
        author_id: i64,
        id: i64,
        update: AnswerUpdate,
    ) -> Result<Answer, DatabaseError> {
        let answer = self.get_answer(id).await?;
        if answer.author_id != author_id {
            return Err(DatabaseError::permission(
                "only the author can edit this answer",
            ));
        }

        let mut sets = SetClauses::new();
        if let Some(ref body) = update.body {
            if body.trim().is_empty() {
                return Err(DatabaseError::validation("answer body must not be empty"));
            }
            sets.push("body", body.as_str());
        }
        if let Some(is_best) = update.is_best {
            sets.push("is_best", i64::from(is_best));
        }
        if sets.is_empty() {
            return Ok(answer);
        }

        let (sql, params) = sets.into_sql("answers", id, Utc::now());
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.emit(
            WriteEvent::updated(EntityType::Answer, id)
                .with_parent(EntityType::Question, answer.question_id)
                .with_detail(&update),
        )
        .await?;
        self.get_answer(id).await
    }

    /// Delete an answer. Its votes go with it. Only its author may do so.
    pub async fn delete_answer(&self, author_id: i64, id: i64) -> Result<(), DatabaseError> {
        let answer = self.get_answer(id).await?;
        if answer.author_id != author_id {
            return Err(DatabaseError::permission(
                "only the author can delete this answer",
            ));
        }
        self.db()
            .conn()
            .execute("DELETE FROM answers WHERE id = ?1", [id])
            .await?;
        self.emit(
            WriteEvent::deleted(EntityType::Answer, id)
                .with_parent(EntityType::Question, answer.question_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_answer, seed_question, seed_student, test_service};
    use crate::updates::answer::AnswerUpdateBuilder;
    use campus_core::enums::VoteType;
    use campus_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn list_answers_newest_first() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let question = seed_question(&svc, &ada, "Q").await;
        let first = seed_answer(&svc, &question, &ada).await;
        let second = seed_answer(&svc, &question, &ada).await;

        let ids: Vec<i64> = svc
            .list_answers(question.id)
            .await
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn answer_to_missing_question() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let err = svc.create_answer(3, ada.id, "body").await.unwrap_err();
        assert_eq!(err.to_string(), "question not found: 3");
    }

    #[tokio::test]
    async fn only_author_may_edit() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        let question = seed_question(&svc, &ada, "Q").await;
        let answer = seed_answer(&svc, &question, &alan).await;

        let update = AnswerUpdateBuilder::new().body("Better").is_best(true).build();
        let err = svc
            .update_answer(ada.id, answer.id, update.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permission);

        let edited = svc.update_answer(alan.id, answer.id, update).await.unwrap();
        assert_eq!(edited.body, "Better");
        assert!(edited.is_best);
    }

    #[tokio::test]
    async fn delete_answer_removes_votes() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        let question = seed_question(&svc, &ada, "Q").await;
        let answer = seed_answer(&svc, &question, &alan).await;
        svc.cast_vote(ada.id, answer.id, VoteType::Up).await.unwrap();

        let err = svc.delete_answer(ada.id, answer.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permission);

        svc.delete_answer(alan.id, answer.id).await.unwrap();
        assert!(svc.find_vote(ada.id, answer.id).await.unwrap().is_none());
        let ranked = svc.rank(Some(question.id)).await.unwrap();
        assert_eq!(ranked.total_answers, 0);
    }
}
