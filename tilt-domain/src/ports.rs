// Ingestion and transport port traits (interfaces)
// Define what the orchestration layer must provide around the core

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
