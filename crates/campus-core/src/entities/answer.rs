use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An answer to a forum question. Owns its votes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub body: String,
    pub is_best: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
