//! Vote ledger: cast, remove, tally, and rank.
//!
//! `cast_vote` decides what to do with [`VoteAction::resolve`] and applies it
//! with a statement conditioned on the state it read:
//!
//! - insert: `ON CONFLICT(user_id, answer_id) DO NOTHING`
//! - delete / switch: `WHERE ... AND vote_type = <type that was read>`
//!
//! If the statement touched no row, another request changed the pair in the
//! meantime and the decision is re-made against the row that is there now.
//! Together with `UNIQUE(user_id, answer_id)` this keeps one vote per pair
//! under concurrent casts.

use campus_core::entities::Vote;
use campus_core::enums::{EntityType, VoteType};
use campus_core::responses::{RankedAnswers, VoteResult};
use campus_core::voting::{RankedAnswer, VoteAction, VoteTally, rank_answers};

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{get_u32, parse_enum};
use crate::service::CampusService;

/// How many times `cast_vote` re-reads the pair after losing a race.
const MAX_RESOLVE_ROUNDS: usize = 3;

fn row_to_vote(row: &libsql::Row) -> Result<Vote, DatabaseError> {
    Ok(Vote {
        id: row.get::<i64>(0)?,
        user_id: row.get::<i64>(1)?,
        answer_id: row.get::<i64>(2)?,
        vote_type: parse_enum(&row.get::<String>(3)?)?,
    })
}

impl CampusService {
    /// The vote a user holds on an answer, if any.
    pub async fn find_vote(
        &self,
        user_id: i64,
        answer_id: i64,
    ) -> Result<Option<Vote>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, user_id, answer_id, vote_type FROM votes
                 WHERE user_id = ?1 AND answer_id = ?2",
                libsql::params![user_id, answer_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_vote(&row)?)),
            None => Ok(None),
        }
    }

    /// Cast, toggle off, or switch a vote.
    ///
    /// The answer is checked before the user.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing answer or user; `Conflict` if the pair kept
    /// changing underneath every attempt to apply the vote.
    pub async fn cast_vote(
        &self,
        user_id: i64,
        answer_id: i64,
        vote_type: VoteType,
    ) -> Result<VoteResult, DatabaseError> {
        self.require(EntityType::Answer, answer_id).await?;
        self.require(EntityType::User, user_id).await?;

        for _ in 0..MAX_RESOLVE_ROUNDS {
            let existing = self.find_vote(user_id, answer_id).await?;
            let action = VoteAction::resolve(existing.as_ref().map(|v| v.vote_type), vote_type);

            let applied = match (action, &existing) {
                (VoteAction::Insert(new_type), _) => self
                    .insert_returning_id(
                        "INSERT INTO votes (user_id, answer_id, vote_type) VALUES (?1, ?2, ?3)
                         ON CONFLICT(user_id, answer_id) DO NOTHING RETURNING id",
                        libsql::params![user_id, answer_id, new_type.as_str()],
                    )
                    .await?
                    .map(|id| WriteEvent::created(EntityType::Vote, id)),
                (VoteAction::Delete, Some(current)) => {
                    let deleted = self
                        .db()
                        .conn()
                        .execute(
                            "DELETE FROM votes WHERE id = ?1 AND vote_type = ?2",
                            libsql::params![current.id, current.vote_type.as_str()],
                        )
                        .await?;
                    (deleted == 1).then(|| WriteEvent::deleted(EntityType::Vote, current.id))
                }
                (VoteAction::Switch(new_type), Some(current)) => {
                    let switched = self
                        .db()
                        .conn()
                        .execute(
                            "UPDATE votes SET vote_type = ?1 WHERE id = ?2 AND vote_type = ?3",
                            libsql::params![
                                new_type.as_str(),
                                current.id,
                                current.vote_type.as_str()
                            ],
                        )
                        .await?;
                    (switched == 1).then(|| WriteEvent::updated(EntityType::Vote, current.id))
                }
                (VoteAction::Delete | VoteAction::Switch(_), None) => {
                    return Err(DatabaseError::InvalidState(
                        "vote action resolved against a missing row".into(),
                    ));
                }
            };

            if let Some(event) = applied {
                let outcome = action.outcome();
                tracing::debug!(user_id, answer_id, %vote_type, %outcome, "vote applied");
                self.emit(event.with_detail(&serde_json::json!({
                    "user_id": user_id,
                    "answer_id": answer_id,
                    "vote_type": vote_type,
                })))
                .await?;
                return Ok(VoteResult {
                    user_id,
                    answer_id,
                    vote_type,
                    outcome,
                    message: outcome.message(vote_type),
                });
            }

            tracing::warn!(user_id, answer_id, "vote changed concurrently, re-resolving");
        }

        Err(DatabaseError::conflict(
            "the vote kept changing concurrently; try again",
        ))
    }

    /// Delete a user's vote on an answer, whatever its type.
    ///
    /// # Errors
    ///
    /// `NotFound` (entity `vote`, id = the answer id) when the pair has no vote.
    pub async fn remove_vote(&self, user_id: i64, answer_id: i64) -> Result<Vote, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "DELETE FROM votes WHERE user_id = ?1 AND answer_id = ?2
                 RETURNING id, user_id, answer_id, vote_type",
                libsql::params![user_id, answer_id],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Err(DatabaseError::not_found(EntityType::Vote, answer_id));
        };
        let vote = row_to_vote(&row)?;
        drop(rows);

        self.emit(WriteEvent::deleted(EntityType::Vote, vote.id).with_detail(&vote))
            .await?;
        Ok(vote)
    }

    /// Up/down counts and score for one answer.
    pub async fn tally(&self, answer_id: i64) -> Result<VoteTally, DatabaseError> {
        self.require(EntityType::Answer, answer_id).await?;
        self.count_votes(answer_id).await
    }

    async fn count_votes(&self, answer_id: i64) -> Result<VoteTally, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COALESCE(SUM(vote_type = 'up'), 0), COALESCE(SUM(vote_type = 'down'), 0)
                 FROM votes WHERE answer_id = ?1",
                [answer_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(VoteTally::new(answer_id, get_u32(&row, 0)?, get_u32(&row, 1)?))
    }

    /// Rank answers by score, highest first; equal scores by answer id ascending.
    ///
    /// With `question_id` only that question's answers are candidates. An
    /// unknown question yields an empty ranking. Each answer's tally is read
    /// independently.
    pub async fn rank(&self, question_id: Option<i64>) -> Result<RankedAnswers, DatabaseError> {
        let mut rows = match question_id {
            Some(question_id) => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, question_id, author_id, body FROM answers
                         WHERE question_id = ?1 ORDER BY id",
                        [question_id],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        "SELECT id, question_id, author_id, body FROM answers ORDER BY id",
                        (),
                    )
                    .await?
            }
        };

        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push((
                row.get::<i64>(0)?,
                row.get::<i64>(1)?,
                row.get::<i64>(2)?,
                row.get::<String>(3)?,
            ));
        }
        drop(rows);

        let mut answers = Vec::with_capacity(candidates.len());
        for (answer_id, question_id, author_id, body) in candidates {
            let tally = self.count_votes(answer_id).await?;
            answers.push(RankedAnswer::new(question_id, author_id, body, tally));
        }

        Ok(RankedAnswers {
            total_answers: u32::try_from(answers.len()).unwrap_or(u32::MAX),
            answers: rank_answers(answers),
        })
    }
}
