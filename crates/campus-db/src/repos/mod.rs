//! Repository modules implementing operations for all Campus entities.
//!
//! Each module adds methods to `CampusService` via `impl CampusService` blocks.

pub mod activity;
pub mod answers;
pub mod assignments;
pub mod courses;
pub mod flashcards;
pub mod grades;
pub mod notes;
pub mod questions;
pub mod submissions;
pub mod units;
pub mod users;
pub mod votes;
