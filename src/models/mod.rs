//! Core data models for the class registry.
//!
//! Teachers and students are identified by email; a registration pairs one
//! student with one teacher, at most once per pair. All three map directly
//! to database tables via `sqlx::FromRow` and serialize as JSON via `serde`.

pub mod registration;
pub mod student;
pub mod teacher;
