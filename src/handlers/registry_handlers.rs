//! HTTP handlers for registration, suspension, and notification-recipient
//! endpoints. Each handler validates its parameters up front: failed
//! validation responds 400 with a message, store failures surface as 500.

use crate::{
    email::{are_valid_emails, dedup_emails, is_valid_email, parse_tagged_emails},
    errors::AppError,
    services::registry_service::RegistryService,
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

/// Body for `POST /api/register`. Fields are optional so that a missing
/// field reports its own message rather than a generic parse error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub teacher: Option<String>,
    pub students: Option<Vec<String>>,
}

/// Body for `POST /api/suspend`.
#[derive(Debug, Deserialize)]
pub struct SuspendRequest {
    pub student: Option<String>,
}

/// Body for `POST /api/retrievefornotifications`.
#[derive(Debug, Deserialize)]
pub struct RetrieveForNotificationsRequest {
    pub teacher: Option<String>,
    pub notification: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<String>,
}

/// `POST /api/register` — register students under a teacher.
///
/// Teacher and students are upserted by email; each (student, teacher)
/// pairing is recorded at most once, so re-posting the same registration is
/// harmless. Responds 204 on success.
pub async fn register_students(
    State(service): State<RegistryService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::bad_request("Incorrect input format"))?;

    let teacher_email = payload
        .teacher
        .ok_or_else(|| AppError::bad_request("Teacher email not provided"))?;
    if !is_valid_email(&teacher_email) {
        return Err(AppError::bad_request("Teacher email provided is invalid"));
    }
    let students = payload
        .students
        .ok_or_else(|| AppError::bad_request("Student email(s) not provided"))?;
    if !are_valid_emails(&students) {
        return Err(AppError::bad_request(
            "One or more student emails provided are invalid",
        ));
    }
    let student_emails = dedup_emails(students);

    let teacher = service.add_teacher(&teacher_email).await?;
    for student_email in &student_emails {
        let student = service.add_student(student_email).await?;
        service.add_registration(student.id, teacher.id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/commonstudents?teacher=...&teacher=...` — students registered
/// under the given teacher(s).
///
/// The `teacher` key may appear once or repeatedly; both arrive as raw
/// key/value pairs and are normalized to one list here. The result merges
/// every named teacher's distinct student emails into one distinct set.
pub async fn get_common_students(
    State(service): State<RegistryService>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let teacher_emails: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == "teacher")
        .map(|(_, value)| value)
        .collect();
    if teacher_emails.is_empty() {
        return Err(AppError::bad_request("Teacher email(s) not provided"));
    }
    if !are_valid_emails(&teacher_emails) {
        return Err(AppError::bad_request(
            "One or more teacher emails provided are invalid",
        ));
    }
    let teacher_emails = dedup_emails(teacher_emails);

    let students = service.common_student_emails(&teacher_emails).await?;
    Ok(Json(CommonStudentsResponse { students }))
}

/// `POST /api/suspend` — suspend a student by email.
///
/// Responds 204 once the suspended flag is verified on the updated record.
pub async fn suspend_student(
    State(service): State<RegistryService>,
    payload: Result<Json<SuspendRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::bad_request("Incorrect input format"))?;

    let student_email = payload
        .student
        .ok_or_else(|| AppError::bad_request("Student email not provided"))?;
    if !is_valid_email(&student_email) {
        return Err(AppError::bad_request("Student email provided is invalid"));
    }

    let student = service.suspend_student(&student_email).await?;
    if !student.is_suspended {
        return Err(AppError::internal("Internal Error"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/retrievefornotifications` — recipients of a notification.
///
/// Recipients are the teacher's non-suspended registered students plus the
/// distinct emails tagged with `@` in the notification text. Tagged emails
/// are deduplicated here; the combined list is not deduplicated against the
/// registered students.
pub async fn retrieve_for_notifications(
    State(service): State<RegistryService>,
    payload: Result<Json<RetrieveForNotificationsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::bad_request("Incorrect input format"))?;

    let teacher_email = payload
        .teacher
        .ok_or_else(|| AppError::bad_request("Teacher email not provided"))?;
    if !is_valid_email(&teacher_email) {
        return Err(AppError::bad_request("Teacher email provided is invalid"));
    }
    let notification = payload
        .notification
        .ok_or_else(|| AppError::bad_request("Notification not provided"))?;

    let additional = dedup_emails(parse_tagged_emails(&notification));
    let recipients = service
        .notification_recipients(&teacher_email, &additional)
        .await?;

    Ok(Json(RecipientsResponse { recipients }))
}
