//! Represents a teacher — a registrable owner of student registrations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A teacher record.
///
/// Teachers are created implicitly the first time students are registered
/// under their email; the email is the unique external identity.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Teacher {
    /// Internal row id.
    pub id: i64,

    /// Unique email identifying this teacher.
    pub email: String,
}
