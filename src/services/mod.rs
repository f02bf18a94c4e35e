pub mod registry_service;
