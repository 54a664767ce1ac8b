use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A multiple-choice card derived from a note.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Flashcard {
    pub id: i64,
    pub note_id: i64,
    pub question: String,
    pub answer: String,
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A card that has not been stored yet, e.g. one produced by generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlashcardDraft {
    pub question: String,
    pub answer: String,
    pub options: Vec<String>,
}
