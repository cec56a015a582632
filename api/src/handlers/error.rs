//! Framework-level error responses (malformed bodies, unknown routes)

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use otp_shared::{error_codes, ErrorResponse};

use super::context::extract_language;
use crate::i18n::{message, MessageKey};

/// Error handler for `web::JsonConfig`
///
/// Unparseable or oversized bodies become a localized 400 instead of
/// actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let lang = extract_language(req);
    tracing::debug!(path = %req.path(), error = %err, "Rejected request body");

    let body = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        message(MessageKey::ValidationError, lang),
    )
    .add_detail("reason", err.to_string());

    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = extract_language(&req);
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        message(MessageKey::NotFound, lang),
    ))
}
