use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VoteType;

/// One user's vote on one answer. At most one exists per (user, answer).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub answer_id: i64,
    pub vote_type: VoteType,
}
