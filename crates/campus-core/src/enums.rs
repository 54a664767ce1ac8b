//! Roles, vote types, entity types, and write operations for Campus.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for their SQL storage representation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of a user account.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VoteType
// ---------------------------------------------------------------------------

/// Direction of a vote on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(CoreError::Validation(format!(
                "vote_type must be 'up' or 'down', got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// VoteOutcome
// ---------------------------------------------------------------------------

/// What a `cast_vote` call did to the (user, answer) vote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    /// No vote existed; one was inserted.
    Created,
    /// The same vote was cast again; the existing row was deleted.
    Removed,
    /// The opposite vote existed; its type was flipped in place.
    Switched,
}

impl VoteOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Removed => "removed",
            Self::Switched => "switched",
        }
    }

    /// Human-readable message for the outcome, e.g. `"upvote added."`.
    #[must_use]
    pub fn message(self, vote_type: VoteType) -> String {
        match self {
            Self::Created => format!("{vote_type}vote added."),
            Self::Removed => format!("{vote_type}vote removed."),
            Self::Switched => format!("Vote changed to {vote_type}vote."),
        }
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in errors, write events and the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Course,
    Unit,
    Note,
    Flashcard,
    Question,
    Answer,
    Vote,
    Assignment,
    Submission,
    Grade,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Course => "course",
            Self::Unit => "unit",
            Self::Note => "note",
            Self::Flashcard => "flashcard",
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Vote => "vote",
            Self::Assignment => "assignment",
            Self::Submission => "submission",
            Self::Grade => "grade",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WriteOp
// ---------------------------------------------------------------------------

/// Kind of mutation reported by a write event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WriteOp {
    Created,
    Updated,
    Deleted,
}

impl WriteOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! serde_matches_as_str {
        ($name:ident, $ty:ty, [$($variant:expr),+ $(,)?]) => {
            #[test]
            fn $name() {
                for v in [$($variant),+] {
                    let json = serde_json::to_value(v).unwrap();
                    assert_eq!(json, serde_json::Value::String(v.as_str().to_string()));
                    let back: $ty = serde_json::from_value(json).unwrap();
                    assert_eq!(back, v);
                }
            }
        };
    }

    serde_matches_as_str!(
        user_role_serde,
        UserRole,
        [UserRole::Student, UserRole::Instructor, UserRole::Admin]
    );
    serde_matches_as_str!(vote_type_serde, VoteType, [VoteType::Up, VoteType::Down]);
    serde_matches_as_str!(
        vote_outcome_serde,
        VoteOutcome,
        [VoteOutcome::Created, VoteOutcome::Removed, VoteOutcome::Switched]
    );
    serde_matches_as_str!(
        write_op_serde,
        WriteOp,
        [WriteOp::Created, WriteOp::Updated, WriteOp::Deleted]
    );
    serde_matches_as_str!(
        entity_type_serde,
        EntityType,
        [
            EntityType::User,
            EntityType::Course,
            EntityType::Unit,
            EntityType::Note,
            EntityType::Flashcard,
            EntityType::Question,
            EntityType::Answer,
            EntityType::Vote,
            EntityType::Assignment,
            EntityType::Submission,
            EntityType::Grade,
        ]
    );

    #[test]
    fn vote_type_parses_known_values() {
        assert_eq!("up".parse::<VoteType>().unwrap(), VoteType::Up);
        assert_eq!("down".parse::<VoteType>().unwrap(), VoteType::Down);
    }

    #[test]
    fn vote_type_rejects_unknown_values() {
        let err = "sideways".parse::<VoteType>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!("UP".parse::<VoteType>().is_err());
        assert!("".parse::<VoteType>().is_err());
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(VoteOutcome::Created.message(VoteType::Up), "upvote added.");
        assert_eq!(
            VoteOutcome::Removed.message(VoteType::Down),
            "downvote removed."
        );
        assert_eq!(
            VoteOutcome::Switched.message(VoteType::Down),
            "Vote changed to downvote."
        );
    }

    #[test]
    fn default_role_is_student() {
        assert_eq!(UserRole::default(), UserRole::Student);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", UserRole::Instructor), "instructor");
        assert_eq!(format!("{}", VoteType::Down), "down");
        assert_eq!(format!("{}", VoteOutcome::Switched), "switched");
        assert_eq!(format!("{}", EntityType::Submission), "submission");
        assert_eq!(format!("{}", WriteOp::Deleted), "deleted");
    }
}
