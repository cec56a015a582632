//! OTP HTTP API
//!
//! Actix-web surface over the OTP lifecycle manager: request and verify
//! endpoints, health reporting, localized messages and request context
//! extraction.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
