//! CORS configuration for browser and mobile clients.
//!
//! Development is permissive. Production only admits origins listed in
//! `ALLOWED_ORIGINS` (comma separated) plus `https://` origins derived from
//! `WEB_DOMAIN`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use otp_shared::Environment;
use std::env;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for `environment`.
///
/// `CORS_MAX_AGE` overrides the preflight cache lifetime (seconds).
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_production() {
        create_production_cors(max_age, allowed_origins())
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::debug!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-request-id"),
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::RETRY_AFTER,
        ])
        .max_age(max_age)
}

fn create_production_cors(max_age: usize, origins: Vec<String>) -> Cors {
    tracing::info!(origins = ?origins, "Configuring CORS for production");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::RETRY_AFTER,
        ])
        .max_age(max_age);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Origins admitted in production
fn allowed_origins() -> Vec<String> {
    let mut origins: Vec<String> = env::var("ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if let Ok(web_domain) = env::var("WEB_DOMAIN") {
        let web_domain = web_domain.trim();
        if !web_domain.is_empty() {
            origins.push(format!("https://{}", web_domain));
            origins.push(format!("https://www.{}", web_domain));
        }
    }

    origins
}
