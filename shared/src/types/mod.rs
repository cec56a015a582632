//! Type definitions shared between the API layer and its clients
//!
//! - `language` - Internationalization and language types
//! - `response` - API response wrappers and health checks

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
