//! Per-request context: request id, client address and language

use actix_web::HttpRequest;
use otp_shared::Language;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Values every handler needs from the incoming request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub client_ip: Option<String>,
    pub language: Language,
}

impl RequestContext {
    /// Build the context for `req`
    ///
    /// Forwarding headers are only consulted when `trust_forwarded_headers`
    /// is set; otherwise the socket peer is the client.
    pub fn extract(req: &HttpRequest, trust_forwarded_headers: bool) -> Self {
        Self {
            request_id: extract_request_id(req),
            client_ip: extract_client_ip(req, trust_forwarded_headers),
            language: extract_language(req),
        }
    }
}

/// Reuse the caller's `X-Request-ID` or mint a new one
pub fn extract_request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Preferred response language from `Accept-Language`
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get("Accept-Language")
        .and_then(|v| v.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Client address used for the per-address quota
pub fn extract_client_ip(req: &HttpRequest, trust_forwarded_headers: bool) -> Option<String> {
    if trust_forwarded_headers {
        let forwarded = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }

        let real_ip = req
            .headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = real_ip {
            return Some(ip.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}
