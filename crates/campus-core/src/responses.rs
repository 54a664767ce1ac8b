//! Result values handed to the outer layer.
//!
//! The core defines no wire format. These structs are what `campus` prints
//! (as JSON or a table) and what a transport layer would translate into
//! responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Flashcard, Submission};
use crate::enums::{VoteOutcome, VoteType};
use crate::gate::{Attempt, GateRejection};
use crate::voting::RankedAnswer;

/// Result of `cast_vote`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteResult {
    pub user_id: i64,
    pub answer_id: i64,
    pub vote_type: VoteType,
    pub outcome: VoteOutcome,
    pub message: String,
}

/// Result of ranking answers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RankedAnswers {
    pub total_answers: u32,
    pub answers: Vec<RankedAnswer>,
}

/// A successfully recorded attempt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission: Submission,
    pub attempt: Attempt,
    /// e.g. `"2 of 3"`.
    pub attempts: String,
    pub message: String,
}

impl SubmissionReceipt {
    #[must_use]
    pub fn new(submission: Submission, attempt: Attempt) -> Self {
        let attempts = attempt.label();
        Self {
            message: format!("Submission successful (Attempt {attempts})"),
            submission,
            attempt,
            attempts,
        }
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateDecision {
    Accepted(SubmissionReceipt),
    Rejected(GateRejection),
}

impl GateDecision {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The rejection reason, if the attempt was refused.
    #[must_use]
    pub const fn rejection(&self) -> Option<&GateRejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Response from flashcard generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlashcardBatch {
    pub note_id: i64,
    pub generated: u32,
    pub skipped: u32,
    pub flashcards: Vec<Flashcard>,
}
