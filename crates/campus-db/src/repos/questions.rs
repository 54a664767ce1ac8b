//! Question repository.

use chrono::Utc;

use campus_core::entities::Question;
use campus_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{SetClauses, get_u32, is_unique_violation, parse_datetime};
use crate::service::CampusService;
use crate::updates::question::QuestionUpdate;

const QUESTION_SELECT: &str = "SELECT q.id, q.author_id, q.title, q.body,
        (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id),
        q.created_at, q.updated_at
     FROM questions q";

fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    Ok(Question {
        id: row.get::<i64>(0)?,
        author_id: row.get::<i64>(1)?,
        title: row.get::<String>(2)?,
        body: row.get::<String>(3)?,
        answers_count: get_u32(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn duplicate_title(title: &str) -> DatabaseError {
    DatabaseError::conflict(format!("you already asked a question titled '{title}'"))
}

impl CampusService {
    pub async fn create_question(
        &self,
        author_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Question, DatabaseError> {
        let title = title.trim();
        if title.is_empty() || body.trim().is_empty() {
            return Err(DatabaseError::validation(
                "a question needs a title and a body",
            ));
        }
        self.require(EntityType::User, author_id).await?;

        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO questions (author_id, title, body, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                libsql::params![author_id, title, body, now.to_rfc3339(), now.to_rfc3339()],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_title(title)),
            Err(e) => return Err(e.into()),
        };

        self.emit(WriteEvent::created(EntityType::Question, id)).await?;

        Ok(Question {
            id,
            author_id,
            title: title.to_string(),
            body: body.to_string(),
            answers_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a question with its current answer count.
    pub async fn get_question(&self, id: i64) -> Result<Question, DatabaseError> {
        let sql = format!("{QUESTION_SELECT} WHERE q.id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Question, id))?;
        row_to_question(&row)
    }

    /// Questions, newest first, optionally only those by one author.
    pub async fn list_questions(
        &self,
        author_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Question>, DatabaseError> {
        let mut rows = match author_id {
            Some(author_id) => {
                let sql = format!(
                    "{QUESTION_SELECT} WHERE q.author_id = ?1
                     ORDER BY q.created_at DESC, q.id DESC LIMIT {limit}"
                );
                self.db().conn().query(&sql, [author_id]).await?
            }
            None => {
                let sql = format!(
                    "{QUESTION_SELECT} ORDER BY q.created_at DESC, q.id DESC LIMIT {limit}"
                );
                self.db().conn().query(&sql, ()).await?
            }
        };

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }

    /// Edit a question. Only its author may do so.
    pub async fn update_question(
        &self,
        author_id: i64,
        id: i64,
        update: QuestionUpdate,
    ) -> Result<Question, DatabaseError> {
        let question = self.get_question(id).await?;
        if question.author_id != author_id {
            return Err(DatabaseError::permission(
                "only the author can edit this question",
            ));
        }

        let mut sets = SetClauses::new();
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(DatabaseError::validation("title must not be empty"));
            }
            sets.push("title", title.trim());
        }
        if let Some(ref body) = update.body {
            if body.trim().is_empty() {
                return Err(DatabaseError::validation("body must not be empty"));
            }
            sets.push("body", body.as_str());
        }
        if sets.is_empty() {
            return Ok(question);
        }

        let (sql, params) = sets.into_sql("questions", id, Utc::now());
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

        self.emit(WriteEvent::updated(EntityType::Question, id).with_detail(&update))
            .await?;
        self.get_question(id).await
    }

    /// Delete a question and its answers. Only its author may do so.
    pub async fn delete_question(&self, author_id: i64, id: i64) -> Result<(), DatabaseError> {
        let question = self.get_question(id).await?;
        if question.author_id != author_id {
            return Err(DatabaseError::permission(
                "only the author can delete this question",
            ));
        }
        self.db()
            .conn()
            .execute("DELETE FROM questions WHERE id = ?1", [id])
            .await?;
        self.emit(WriteEvent::deleted(EntityType::Question, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_answer, seed_question, seed_student, test_service};
    use crate::updates::question::QuestionUpdateBuilder;
    use campus_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_count_answers() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        let question = seed_question(&svc, &ada, "What is a buffer?").await;
        assert_eq!(question.answers_count, 0);

        seed_answer(&svc, &question, &alan).await;
        seed_answer(&svc, &question, &ada).await;

        let fetched = svc.get_question(question.id).await.unwrap();
        assert_eq!(fetched.answers_count, 2);
        assert_eq!(fetched.title, "What is a buffer?");
    }

    #[tokio::test]
    async fn duplicate_title_per_author_conflicts() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        seed_question(&svc, &ada, "What is a buffer?").await;

        let err = svc
            .create_question(ada.id, "What is a buffer?", "again")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Another author may reuse the title
        seed_question(&svc, &alan, "What is a buffer?").await;
    }

    #[tokio::test]
    async fn missing_author() {
        let svc = test_service().await;
        let err = svc.create_question(12, "Title", "Body").await.unwrap_err();
        assert_eq!(err.to_string(), "user not found: 12");
    }

    #[tokio::test]
    async fn only_author_may_edit_or_delete() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        let question = seed_question(&svc, &ada, "What is a buffer?").await;

        let update = QuestionUpdateBuilder::new().body("Edited").build();
        let err = svc
            .update_question(alan.id, question.id, update.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permission);
        let err = svc.delete_question(alan.id, question.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permission);

        let edited = svc.update_question(ada.id, question.id, update).await.unwrap();
        assert_eq!(edited.body, "Edited");
        assert_eq!(edited.title, "What is a buffer?");

        svc.delete_question(ada.id, question.id).await.unwrap();
        assert_eq!(
            svc.get_question(question.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn list_by_author() {
        let svc = test_service().await;
        let ada = seed_student(&svc, "ada").await;
        let alan = seed_student(&svc, "alan").await;
        seed_question(&svc, &ada, "One").await;
        seed_question(&svc, &ada, "Two").await;
        seed_question(&svc, &alan, "Three").await;

        let mine = svc.list_questions(Some(ada.id), 20).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].title, "Two");
        assert_eq!(svc.list_questions(None, 20).await.unwrap().len(), 3);
    }
}
