use axum_test::TestServer;
use class_registry::{RegistryService, routes};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

/// Spin up a TestServer over a router backed by a fresh in-memory SQLite
/// database with the schema applied.
pub async fn setup_test_server() -> TestServer {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    for statement in include_str!("../../migrations/0001_init.sql")
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        sqlx::query(statement).execute(&pool).await.expect("migrate");
    }

    let app = routes::routes::routes().with_state(RegistryService::new(Arc::new(pool)));
    TestServer::new(app).expect("test server")
}

/// Register `students` under `teacher` and assert the 204 response.
pub async fn register(server: &TestServer, teacher: &str, students: &[&str]) {
    let response = server
        .post("/api/register")
        .json(&json!({ "teacher": teacher, "students": students }))
        .await;
    assert_eq!(response.status_code(), http::StatusCode::NO_CONTENT);
}
