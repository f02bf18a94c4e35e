//! Defines routes for the class-registry API.
//!
//! ## Structure
//! - **Registry endpoints** (mounted under `/api`)
//!   - `POST /api/register` — register students under a teacher
//!   - `GET  /api/commonstudents` — students registered under the given teacher(s)
//!   - `POST /api/suspend` — suspend a student
//!   - `POST /api/retrievefornotifications` — recipients for a notification
//!
//! - **Health endpoints** (mounted at root)
//!   - `GET /healthz` — liveness
//!   - `GET /readyz`  — readiness (database probe)

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        registry_handlers::{
            get_common_students, register_students, retrieve_for_notifications, suspend_student,
        },
    },
    services::registry_service::RegistryService,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for all registry routes.
///
/// The router carries shared state (`RegistryService`) to all handlers.
pub fn routes() -> Router<RegistryService> {
    Router::new()
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // registry endpoints
        .route("/api/register", post(register_students))
        .route("/api/commonstudents", get(get_common_students))
        .route("/api/suspend", post(suspend_student))
        .route("/api/retrievefornotifications", post(retrieve_for_notifications))
}
