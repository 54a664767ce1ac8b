//! Entity structs for all Campus domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `campus-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema validation.

mod activity;
mod answer;
mod assignment;
mod course;
mod flashcard;
mod grade;
mod note;
mod question;
mod submission;
mod unit;
mod user;
mod vote;

pub use activity::ActivityEntry;
pub use answer::Answer;
pub use assignment::Assignment;
pub use course::Course;
pub use flashcard::{Flashcard, FlashcardDraft};
pub use grade::Grade;
pub use note::Note;
pub use question::Question;
pub use submission::Submission;
pub use unit::Unit;
pub use user::User;
pub use vote::Vote;
