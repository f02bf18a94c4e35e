//! Represents a student and their suspension state.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student record.
///
/// Like teachers, students are created implicitly on first registration.
/// Suspended students stay registered but are excluded from notification
/// recipient lists.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Student {
    /// Internal row id.
    pub id: i64,

    /// Unique email identifying this student.
    pub email: String,

    /// Whether the student is currently suspended.
    pub is_suspended: bool,
}
