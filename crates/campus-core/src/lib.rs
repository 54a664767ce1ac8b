//! # campus-core
//!
//! Core types, policy logic, and error types for Campus.
//!
//! This crate provides the foundational types shared across all Campus crates:
//! - Entity structs for all domain objects (users, assignments, answers, votes, etc.)
//! - Enums with their SQL storage representation
//! - Vote toggle/switch resolution, tallies, and answer ranking
//! - The submission gate: ordered eligibility checks for assignment attempts
//! - Cross-cutting error taxonomy
//! - Response types returned to the outer layer

pub mod entities;
pub mod enums;
pub mod errors;
pub mod gate;
pub mod responses;
pub mod voting;
