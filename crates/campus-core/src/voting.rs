//! Vote resolution, tallies, and answer ranking.
//!
//! A user holds at most one vote per answer. Casting the same type twice
//! cancels it; casting the opposite type flips it in place:
//!
//! ```text
//! (none)  + up   → insert up      (created)
//! up      + up   → delete         (removed)
//! up      + down → set down       (switched)
//! ```
//!
//! Ranking orders answers by score descending. Equal scores are ordered by
//! answer id ascending so repeated rankings are stable.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{VoteOutcome, VoteType};

/// Row-level action required to apply an incoming vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Insert(VoteType),
    Delete,
    Switch(VoteType),
}

impl VoteAction {
    /// Decide the action from the currently stored vote (if any) and the incoming one.
    #[must_use]
    pub fn resolve(existing: Option<VoteType>, incoming: VoteType) -> Self {
        match existing {
            None => Self::Insert(incoming),
            Some(current) if current == incoming => Self::Delete,
            Some(_) => Self::Switch(incoming),
        }
    }

    #[must_use]
    pub const fn outcome(self) -> VoteOutcome {
        match self {
            Self::Insert(_) => VoteOutcome::Created,
            Self::Delete => VoteOutcome::Removed,
            Self::Switch(_) => VoteOutcome::Switched,
        }
    }
}

/// Up/down counts for one answer. `score` is always `upvotes - downvotes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteTally {
    pub answer_id: i64,
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}

impl VoteTally {
    #[must_use]
    pub fn new(answer_id: i64, upvotes: u32, downvotes: u32) -> Self {
        Self {
            answer_id,
            upvotes,
            downvotes,
            score: i64::from(upvotes) - i64::from(downvotes),
        }
    }
}

/// An answer with its tally, as returned by ranking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RankedAnswer {
    pub answer_id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub body: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}

impl RankedAnswer {
    #[must_use]
    pub fn new(question_id: i64, author_id: i64, body: String, tally: VoteTally) -> Self {
        Self {
            answer_id: tally.answer_id,
            question_id,
            author_id,
            body,
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            score: tally.score,
        }
    }
}

/// Ordering used by [`rank_answers`]: score descending, then answer id ascending.
#[must_use]
pub fn ranking_order(a: &RankedAnswer, b: &RankedAnswer) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.answer_id.cmp(&b.answer_id))
}

/// Sort answers for display.
#[must_use]
pub fn rank_answers(mut answers: Vec<RankedAnswer>) -> Vec<RankedAnswer> {
    answers.sort_by(ranking_order);
    answers
}
