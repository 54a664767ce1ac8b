//! Flashcard repository.
//!
//! Questions are unique within a note. Inserting a duplicate is skipped rather
//! than treated as an error, so a generated batch can be stored as-is.

use chrono::Utc;

use campus_core::entities::{Flashcard, FlashcardDraft};
use campus_core::enums::EntityType;
use campus_core::responses::FlashcardBatch;

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::parse_datetime;
use crate::service::CampusService;

fn row_to_flashcard(row: &libsql::Row) -> Result<Flashcard, DatabaseError> {
    let options: Vec<String> = serde_json::from_str(&row.get::<String>(4)?)
        .map_err(|e| DatabaseError::Query(format!("Invalid flashcard options: {e}")))?;
    Ok(Flashcard {
        id: row.get::<i64>(0)?,
        note_id: row.get::<i64>(1)?,
        question: row.get::<String>(2)?,
        answer: row.get::<String>(3)?,
        options,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl CampusService {
    /// Store one card. Returns `None` when the note already has this question.
    pub async fn create_flashcard(
        &self,
        note_id: i64,
        draft: &FlashcardDraft,
    ) -> Result<Option<Flashcard>, DatabaseError> {
        let question = draft.question.trim();
        let answer = draft.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(DatabaseError::validation(
                "a flashcard needs a question and an answer",
            ));
        }
        self.require(EntityType::Note, note_id).await?;

        let options = serde_json::to_string(&draft.options)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO flashcards (note_id, question, answer, options, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(note_id, question) DO NOTHING RETURNING id",
                libsql::params![
                    note_id,
                    question,
                    answer,
                    options,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let Some(id) = inserted else {
            tracing::debug!(note_id, question, "duplicate flashcard skipped");
            return Ok(None);
        };

        self.emit(
            WriteEvent::created(EntityType::Flashcard, id).with_parent(EntityType::Note, note_id),
        )
        .await?;

        Ok(Some(Flashcard {
            id,
            note_id,
            question: question.to_string(),
            answer: answer.to_string(),
            options: draft.options.clone(),
            created_at: now,
            updated_at: now,
        }))
    }

    /// Store a batch of cards, counting the duplicates that were skipped.
    pub async fn create_flashcards(
        &self,
        note_id: i64,
        drafts: &[FlashcardDraft],
    ) -> Result<FlashcardBatch, DatabaseError> {
        let mut flashcards = Vec::new();
        let mut skipped = 0;
        for draft in drafts {
            match self.create_flashcard(note_id, draft).await? {
                Some(card) => flashcards.push(card),
                None => skipped += 1,
            }
        }
        Ok(FlashcardBatch {
            note_id,
            generated: u32::try_from(flashcards.len()).unwrap_or(u32::MAX),
            skipped,
            flashcards,
        })
    }

    pub async fn list_flashcards(&self, note_id: i64) -> Result<Vec<Flashcard>, DatabaseError> {
        self.require(EntityType::Note, note_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, note_id, question, answer, options, created_at, updated_at
                 FROM flashcards WHERE note_id = ?1 ORDER BY id",
                [note_id],
            )
            .await?;

        let mut cards = Vec::new();
        while let Some(row) = rows.next().await? {
            cards.push(row_to_flashcard(&row)?);
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_instructor, seed_unit, test_service};
    use campus_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    fn draft(question: &str) -> FlashcardDraft {
        FlashcardDraft {
            question: question.into(),
            answer: "Water".into(),
            options: vec!["Water".into(), "Salt".into(), "Sugar".into(), "Oil".into()],
        }
    }

    #[tokio::test]
    async fn batch_skips_duplicate_questions() {
        let svc = test_service().await;
        let grace = seed_instructor(&svc).await;
        let unit = seed_unit(&svc, &grace).await;
        let note = svc.create_note(unit.id, None, Some("Solvents"), None).await.unwrap();

        let batch = svc
            .create_flashcards(
                note.id,
                &[draft("Universal solvent?"), draft("Polar molecule?"), draft("Universal solvent?")],
            )
            .await
            .unwrap();
        assert_eq!(batch.generated, 2);
        assert_eq!(batch.skipped, 1);

        let again = svc
            .create_flashcards(note.id, &[draft("Polar molecule?")])
            .await
            .unwrap();
        assert_eq!(again.generated, 0);
        assert_eq!(again.skipped, 1);

        let stored = svc.list_flashcards(note.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].question, "Universal solvent?");
        assert_eq!(stored[0].options.len(), 4);
    }

    #[tokio::test]
    async fn blank_question_is_invalid() {
        let svc = test_service().await;
        let grace = seed_instructor(&svc).await;
        let unit = seed_unit(&svc, &grace).await;
        let note = svc.create_note(unit.id, None, Some("Solvents"), None).await.unwrap();

        let err = svc.create_flashcard(note.id, &draft(" ")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn missing_note() {
        let svc = test_service().await;
        let err = svc.create_flashcard(4, &draft("Q?")).await.unwrap_err();
        assert_eq!(err.to_string(), "note not found: 4");
    }
}
