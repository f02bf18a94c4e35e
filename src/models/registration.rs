//! Represents a registration — the student/teacher pairing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An unordered pairing of one student and one teacher.
///
/// The store keys registrations by the (student, teacher) pair, so repeated
/// registration of the same pair never records a second row.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Registration {
    /// Row id of the registered student.
    pub student_id: i64,

    /// Row id of the teacher registered under.
    pub teacher_id: i64,
}
