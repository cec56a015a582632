//! Security headers added to every response
//!
//! Responses carry one-time codes' outcomes, so nothing may be cached by
//! intermediaries.

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

/// Default headers applied to all responses
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "DENY"))
        .add((header::REFERRER_POLICY, "no-referrer"))
        .add((header::CACHE_CONTROL, "no-store"))
}
