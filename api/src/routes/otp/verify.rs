use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use otp_core::{AuditSink, CodeGenerator, TtlStore};
use otp_shared::phone::mask_phone_number;
use otp_shared::{error_codes, ApiResponse};

use crate::app::AppState;
use crate::dto::{OtpVerifyRequest, OtpVerifyResponse};
use crate::handlers::context::{RequestContext, REQUEST_ID_HEADER};
use crate::i18n::{message, MessageKey};

/// Handler for POST /api/otp/verify
///
/// Always answers 200 for well-formed bodies; a wrong, expired or never
/// issued code all read `"verified": false`. A successful check consumes
/// the code.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "09123456789", "code": "482913" }
/// ```
pub async fn verify_otp<S, G, A>(
    req: HttpRequest,
    state: web::Data<AppState<S, G, A>>,
    body: web::Json<OtpVerifyRequest>,
) -> HttpResponse
where
    S: TtlStore + 'static,
    G: CodeGenerator + 'static,
    A: AuditSink + 'static,
{
    let ctx = RequestContext::extract(&req, state.server.trust_forwarded_headers);
    let request = body.into_inner();

    if let Err(errors) = request.validate() {
        let field_errors = errors.field_errors();
        warn!(
            request_id = %ctx.request_id,
            fields = ?field_errors.keys().collect::<Vec<_>>(),
            "OTP verification failed validation"
        );

        let (code, key) = if field_errors.contains_key("phone_number") {
            (error_codes::INVALID_PHONE_NUMBER, MessageKey::InvalidPhoneNumber)
        } else {
            (error_codes::VALIDATION_ERROR, MessageKey::ValidationError)
        };

        return HttpResponse::BadRequest()
            .insert_header((REQUEST_ID_HEADER, ctx.request_id.as_str()))
            .insert_header((header::CONTENT_LANGUAGE, ctx.language.code()))
            .json(ApiResponse::error(code).with_data(OtpVerifyResponse {
                verified: false,
                message: message(key, ctx.language).to_string(),
            }));
    }

    let verified = state
        .otp_manager
        .verify_otp(&request.phone_number, &request.code)
        .await;

    info!(
        request_id = %ctx.request_id,
        phone = %mask_phone_number(&request.phone_number),
        verified = verified,
        "OTP verification handled"
    );

    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, ctx.request_id.as_str()))
        .insert_header((header::CONTENT_LANGUAGE, ctx.language.code()))
        .json(ApiResponse::success(OtpVerifyResponse {
            verified,
            message: message(MessageKey::for_verification(verified), ctx.language).to_string(),
        }))
}
