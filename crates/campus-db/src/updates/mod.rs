//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some` fields
//! generate SET clauses in the dynamic UPDATE SQL. The update struct is also the
//! `detail` payload of the resulting write event (changed fields only).

pub mod answer;
pub mod assignment;
pub mod course;
pub mod grade;
pub mod note;
pub mod question;
pub mod unit;
pub mod user;
