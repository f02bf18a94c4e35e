use http::StatusCode;
use serde_json::{Value, json};

mod common;

const TEACHER_EMAIL1: &str = "teacherken@gmail.com";
const STUDENT_EMAIL1: &str = "studentjon@gmail.com";
const STUDENT_EMAIL2: &str = "studenthon@gmail.com";

#[tokio::test]
async fn recipients_combine_registered_students_and_tagged_emails() {
    let server = common::setup_test_server().await;
    common::register(&server, TEACHER_EMAIL1, &[STUDENT_EMAIL1, STUDENT_EMAIL2]).await;

    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({
            "teacher": TEACHER_EMAIL1,
            "notification": "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let recipients = body["recipients"].as_array().unwrap();
    assert_eq!(recipients.len(), 4);
    assert!(recipients.contains(&json!(STUDENT_EMAIL1)));
    assert!(recipients.contains(&json!(STUDENT_EMAIL2)));
    assert!(recipients.contains(&json!("studentagnes@gmail.com")));
    assert!(recipients.contains(&json!("studentmiche@gmail.com")));
}

#[tokio::test]
async fn recipients_exclude_suspended_students() {
    let server = common::setup_test_server().await;
    common::register(&server, TEACHER_EMAIL1, &[STUDENT_EMAIL1, STUDENT_EMAIL2]).await;
    let response = server
        .post("/api/suspend")
        .json(&json!({ "student": STUDENT_EMAIL2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({ "teacher": TEACHER_EMAIL1, "notification": "Hello students!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let recipients = body["recipients"].as_array().unwrap();
    assert_eq!(recipients.len(), 1);
    assert!(recipients.contains(&json!(STUDENT_EMAIL1)));
}

#[tokio::test]
async fn leading_tag_and_malformed_tags_are_ignored() {
    let server = common::setup_test_server().await;
    common::register(&server, TEACHER_EMAIL1, &[]).await;

    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({
            "teacher": TEACHER_EMAIL1,
            "notification": "@all Please report to the lecture hall @13:00hrs! Especially @lolmabeats@gmail.com and @a@aol.com ",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["recipients"], json!(["lolmabeats@gmail.com"]));
}

#[tokio::test]
async fn duplicate_tags_are_collapsed_before_combining() {
    let server = common::setup_test_server().await;
    common::register(&server, TEACHER_EMAIL1, &[]).await;

    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({
            "teacher": TEACHER_EMAIL1,
            "notification": "Hello! @studentagnes@gmail.com @studentagnes@gmail.com",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["recipients"], json!(["studentagnes@gmail.com"]));
}

#[tokio::test]
async fn tagged_email_matching_a_registered_student_appears_twice() {
    let server = common::setup_test_server().await;
    common::register(&server, TEACHER_EMAIL1, &[STUDENT_EMAIL1]).await;

    // The tagged list is deduplicated on its own, not against the fetched
    // registered students.
    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({
            "teacher": TEACHER_EMAIL1,
            "notification": format!("Reminder for @{}", STUDENT_EMAIL1),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["recipients"],
        json!([STUDENT_EMAIL1, STUDENT_EMAIL1])
    );
}

#[tokio::test]
async fn notification_without_teacher_is_rejected() {
    let server = common::setup_test_server().await;
    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({ "notification": "Hello students!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Teacher email not provided");
}

#[tokio::test]
async fn notification_with_invalid_teacher_is_rejected() {
    let server = common::setup_test_server().await;
    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({ "teacher": "a", "notification": "Hello students!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Teacher email provided is invalid");
}

#[tokio::test]
async fn notification_without_message_is_rejected() {
    let server = common::setup_test_server().await;
    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({ "teacher": TEACHER_EMAIL1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Notification not provided");
}

#[tokio::test]
async fn notification_for_unknown_teacher_fails() {
    let server = common::setup_test_server().await;
    let response = server
        .post("/api/retrievefornotifications")
        .json(&json!({ "teacher": TEACHER_EMAIL1, "notification": "Hello students!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Teacher Does Not Exist");
}
