//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// National mobile number: 11 digits with a leading "09"
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^09[0-9]{9}$").unwrap()
});

/// Check if a phone number is a valid national mobile number
///
/// The input is matched as-is; callers are expected to submit the
/// normalized form (no spaces, dashes or country prefix).
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g., 0912****789)
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() >= 8 && phone.is_ascii() {
        format!("{}****{}", &phone[..4], &phone[phone.len() - 3..])
    } else {
        "****".to_string()
    }
}
