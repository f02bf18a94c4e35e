//! src/services/registry_service.rs
//!
//! RegistryService — teacher/student/registration persistence backed by
//! SQLite, plus the set operations the notification endpoints are built on.
//! Inserts are duplicate-safe: re-adding an existing teacher, student, or
//! (student, teacher) pairing never records a second row.

use crate::email::dedup_emails;
use crate::models::{registration::Registration, student::Student, teacher::Teacher};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Teacher Does Not Exist")]
    TeacherNotFound,
    #[error("Student Does Not Exist")]
    StudentNotFound,
    #[error("Registration Does Not Exist")]
    RegistrationNotFound,
    #[error("Internal Error")]
    Internal,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// RegistryService provides the store operations behind the API:
/// - Upsert teachers and students by email
/// - Record registrations, at most one per (student, teacher) pair
/// - Suspend students
/// - Read distinct registered-student emails per teacher, optionally
///   filtered to non-suspended students
///
/// The two read operations fail with a not-found error when the teacher is
/// unknown; callers see that error unchanged.
#[derive(Clone)]
pub struct RegistryService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl RegistryService {
    /// Create a new RegistryService backed by the provided SQLite pool.
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch a teacher by email.
    ///
    /// Returns TeacherNotFound if missing.
    pub async fn fetch_teacher(&self, email: &str) -> RegistryResult<Teacher> {
        sqlx::query_as::<_, Teacher>("SELECT id, email FROM teacher WHERE email = ?")
            .bind(email)
            .fetch_one(&*self.db)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => RegistryError::TeacherNotFound,
                other => RegistryError::Sqlx(other),
            })
    }

    /// Insert a teacher unless one with this email already exists, then
    /// return the stored record.
    pub async fn add_teacher(&self, email: &str) -> RegistryResult<Teacher> {
        sqlx::query("INSERT INTO teacher (email) VALUES (?) ON CONFLICT(email) DO NOTHING")
            .bind(email)
            .execute(&*self.db)
            .await?;

        self.fetch_teacher(email).await
    }

    /// Fetch a student by email.
    ///
    /// Returns StudentNotFound if missing.
    pub async fn fetch_student(&self, email: &str) -> RegistryResult<Student> {
        sqlx::query_as::<_, Student>(
            "SELECT id, email, is_suspended FROM student WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => RegistryError::StudentNotFound,
            other => RegistryError::Sqlx(other),
        })
    }

    /// Insert a student unless one with this email already exists, then
    /// return the stored record.
    pub async fn add_student(&self, email: &str) -> RegistryResult<Student> {
        sqlx::query("INSERT INTO student (email) VALUES (?) ON CONFLICT(email) DO NOTHING")
            .bind(email)
            .execute(&*self.db)
            .await?;

        self.fetch_student(email).await
    }

    /// Mark a student as suspended and return the updated record.
    ///
    /// Returns StudentNotFound for an unknown email. The update must touch
    /// exactly one row; anything else is an internal error.
    pub async fn suspend_student(&self, email: &str) -> RegistryResult<Student> {
        self.fetch_student(email).await?;

        let result = sqlx::query("UPDATE student SET is_suspended = 1 WHERE email = ?")
            .bind(email)
            .execute(&*self.db)
            .await?;
        if result.rows_affected() != 1 {
            return Err(RegistryError::Internal);
        }

        debug!("suspended student {}", email);
        self.fetch_student(email).await
    }

    /// Fetch a registration by its (student, teacher) pair.
    ///
    /// Returns RegistrationNotFound if missing.
    pub async fn fetch_registration(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> RegistryResult<Registration> {
        sqlx::query_as::<_, Registration>(
            "SELECT student_id, teacher_id FROM registration
             WHERE student_id = ? AND teacher_id = ?",
        )
        .bind(student_id)
        .bind(teacher_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => RegistryError::RegistrationNotFound,
            other => RegistryError::Sqlx(other),
        })
    }

    /// Record a registration unless the pair is already registered, then
    /// return the stored record.
    pub async fn add_registration(
        &self,
        student_id: i64,
        teacher_id: i64,
    ) -> RegistryResult<Registration> {
        sqlx::query(
            "INSERT INTO registration (student_id, teacher_id) VALUES (?, ?)
             ON CONFLICT(student_id, teacher_id) DO NOTHING",
        )
        .bind(student_id)
        .bind(teacher_id)
        .execute(&*self.db)
        .await?;

        self.fetch_registration(student_id, teacher_id).await
    }

    /// Distinct emails of all students registered under a teacher.
    ///
    /// Returns TeacherNotFound for an unknown teacher email.
    pub async fn student_emails_for_teacher(&self, email: &str) -> RegistryResult<Vec<String>> {
        let teacher = self.fetch_teacher(email).await?;
        let emails = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT s.email FROM registration AS r
             INNER JOIN student AS s ON s.id = r.student_id
             WHERE r.teacher_id = ?",
        )
        .bind(teacher.id)
        .fetch_all(&*self.db)
        .await?;
        Ok(emails)
    }

    /// Distinct emails of a teacher's registered students who are not
    /// suspended.
    ///
    /// Returns TeacherNotFound for an unknown teacher email.
    pub async fn unsuspended_student_emails_for_teacher(
        &self,
        email: &str,
    ) -> RegistryResult<Vec<String>> {
        let teacher = self.fetch_teacher(email).await?;
        let emails = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT s.email FROM registration AS r
             INNER JOIN student AS s ON s.id = r.student_id
             WHERE r.teacher_id = ? AND s.is_suspended = 0",
        )
        .bind(teacher.id)
        .fetch_all(&*self.db)
        .await?;
        Ok(emails)
    }

    /// Combined distinct student emails across one or more teachers.
    ///
    /// Accumulates each teacher's registered-student emails and collapses
    /// duplicates, keeping first-seen order. The merge is a union across
    /// teachers, which matches the behavior of the endpoint this serves.
    /// Lookups run one teacher at a time; the final distinct step makes the
    /// order of accumulation irrelevant to the result set.
    pub async fn common_student_emails(
        &self,
        teacher_emails: &[String],
    ) -> RegistryResult<Vec<String>> {
        let mut student_emails = Vec::new();
        for teacher_email in teacher_emails {
            let respective = self.student_emails_for_teacher(teacher_email).await?;
            student_emails.extend(respective);
        }
        Ok(dedup_emails(student_emails))
    }

    /// Recipient list for a notification from a teacher: the teacher's
    /// non-suspended registered students followed by the explicitly tagged
    /// `additional` emails.
    ///
    /// `additional` is expected to be pre-deduplicated by the caller's parse
    /// step; the concatenation itself does not deduplicate against the
    /// fetched list, so an additional email that is also a registered
    /// unsuspended student appears twice.
    pub async fn notification_recipients(
        &self,
        teacher_email: &str,
        additional: &[String],
    ) -> RegistryResult<Vec<String>> {
        let mut recipients = self
            .unsuspended_student_emails_for_teacher(teacher_email)
            .await?;
        recipients.extend(additional.iter().cloned());
        Ok(recipients)
    }
}
