//! OTP request and verification DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/otp/request`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    /// Mobile number, e.g. `09123456789`
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}

/// Body of `POST /api/otp/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    /// The code as received by the user
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

/// Payload describing the outcome of an OTP request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtpResponse {
    /// Stable outcome code, e.g. `otp_sent` or `rate_limit_phone`
    pub code: String,
    /// Localized message
    pub message: String,
}

/// Payload of a verification attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtpVerifyResponse {
    pub verified: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: OtpRequest = serde_json::from_str(r#"{"phoneNumber":"09123456789"}"#).unwrap();
        assert_eq!(request.phone_number, "09123456789");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_fields_fail_validation() {
        let request = OtpVerifyRequest {
            phone_number: String::new(),
            code: "123456".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));

        let request = OtpVerifyRequest {
            phone_number: "09123456789".to_string(),
            code: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_oversized_code_fails_validation() {
        let request = OtpVerifyRequest {
            phone_number: "09123456789".to_string(),
            code: "1".repeat(17),
        };
        assert!(request.validate().is_err());
    }
}
