pub mod config;
pub mod email;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types for easier access
pub use models::{registration::Registration, student::Student, teacher::Teacher};
pub use services::registry_service::RegistryService;
