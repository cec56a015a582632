use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use otp_core::{AuditSink, CodeGenerator, OtpOutcome, OtpPolicy, RateLimitScope, TtlStore};
use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{OtpRequest, OtpResponse};
use crate::handlers::context::{RequestContext, REQUEST_ID_HEADER};
use crate::i18n::outcome_message;

/// Handler for POST /api/otp/request
///
/// Issues (or re-announces) a code for the phone number, subject to the
/// per-address quota and per-phone cooldown.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "09123456789" }
/// ```
///
/// # Responses
///
/// - 200 `otp_sent`
/// - 400 `invalid_phone_number`
/// - 429 `rate_limit_address` / `rate_limit_phone`, with `Retry-After`
/// - 503 `transient_failure`
pub async fn request_otp<S, G, A>(
    req: HttpRequest,
    state: web::Data<AppState<S, G, A>>,
    body: web::Json<OtpRequest>,
) -> HttpResponse
where
    S: TtlStore + 'static,
    G: CodeGenerator + 'static,
    A: AuditSink + 'static,
{
    let ctx = RequestContext::extract(&req, state.server.trust_forwarded_headers);
    let request = body.into_inner();

    // Bodies that fail field validation are reported exactly like a
    // malformed phone number.
    let outcome = if let Err(errors) = request.validate() {
        warn!(
            request_id = %ctx.request_id,
            fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
            "OTP request failed validation"
        );
        OtpOutcome::InvalidPhoneNumber
    } else {
        state
            .otp_manager
            .request_otp(&request.phone_number, ctx.client_ip.as_deref())
            .await
    };

    info!(
        request_id = %ctx.request_id,
        phone = %mask_phone_number(&request.phone_number),
        outcome = outcome.code(),
        "OTP request handled"
    );

    outcome_response(&ctx, outcome, state.otp_manager.policy())
}

/// HTTP status for a request outcome
pub fn status_for(outcome: &OtpOutcome) -> StatusCode {
    match outcome {
        OtpOutcome::Sent => StatusCode::OK,
        OtpOutcome::InvalidPhoneNumber => StatusCode::BAD_REQUEST,
        OtpOutcome::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        OtpOutcome::TransientFailure => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn outcome_response(ctx: &RequestContext, outcome: OtpOutcome, policy: &OtpPolicy) -> HttpResponse {
    let payload = OtpResponse {
        code: outcome.code().to_string(),
        message: outcome_message(&outcome, ctx.language).to_string(),
    };

    let body = if outcome.is_sent() {
        ApiResponse::success(payload)
    } else {
        ApiResponse::error(outcome.code()).with_data(payload)
    };

    let mut response = HttpResponse::build(status_for(&outcome));
    response
        .insert_header((REQUEST_ID_HEADER, ctx.request_id.as_str()))
        .insert_header((header::CONTENT_LANGUAGE, ctx.language.code()));

    if let OtpOutcome::RateLimitExceeded(scope) = outcome {
        let retry_after = match scope {
            RateLimitScope::Address => policy.address_window,
            RateLimitScope::Phone => policy.phone_cooldown,
        };
        response.insert_header((header::RETRY_AFTER, retry_after.as_secs().to_string()));
    }

    response.json(body)
}
