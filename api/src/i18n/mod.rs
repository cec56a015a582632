//! Localized response messages
//!
//! Messages exist in English and Persian. Keys are stable; the text behind
//! them is what clients display.

use otp_core::{OtpOutcome, RateLimitScope};
use otp_shared::Language;

/// Identifier of a client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    OtpSent,
    InvalidPhoneNumber,
    RateLimitAddress,
    RateLimitPhone,
    TransientFailure,
    Verified,
    VerificationFailed,
    ValidationError,
    NotFound,
}

impl MessageKey {
    pub fn for_outcome(outcome: &OtpOutcome) -> Self {
        match outcome {
            OtpOutcome::Sent => MessageKey::OtpSent,
            OtpOutcome::InvalidPhoneNumber => MessageKey::InvalidPhoneNumber,
            OtpOutcome::RateLimitExceeded(RateLimitScope::Address) => MessageKey::RateLimitAddress,
            OtpOutcome::RateLimitExceeded(RateLimitScope::Phone) => MessageKey::RateLimitPhone,
            OtpOutcome::TransientFailure => MessageKey::TransientFailure,
        }
    }

    pub fn for_verification(verified: bool) -> Self {
        if verified {
            MessageKey::Verified
        } else {
            MessageKey::VerificationFailed
        }
    }
}

/// Look up the message text for `key` in `lang`
pub fn message(key: MessageKey, lang: Language) -> &'static str {
    match lang {
        Language::English => english(key),
        Language::Persian => persian(key),
    }
}

/// Message for a request outcome
pub fn outcome_message(outcome: &OtpOutcome, lang: Language) -> &'static str {
    message(MessageKey::for_outcome(outcome), lang)
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::OtpSent => OtpOutcome::Sent.message(),
        MessageKey::InvalidPhoneNumber => OtpOutcome::InvalidPhoneNumber.message(),
        MessageKey::RateLimitAddress => {
            OtpOutcome::RateLimitExceeded(RateLimitScope::Address).message()
        }
        MessageKey::RateLimitPhone => OtpOutcome::RateLimitExceeded(RateLimitScope::Phone).message(),
        MessageKey::TransientFailure => OtpOutcome::TransientFailure.message(),
        MessageKey::Verified => "Verified",
        MessageKey::VerificationFailed => "Invalid code",
        MessageKey::ValidationError => "Invalid request data. Please check the submitted fields.",
        MessageKey::NotFound => "The requested resource was not found",
    }
}

fn persian(key: MessageKey) -> &'static str {
    match key {
        MessageKey::OtpSent => "کد OTP با موفقیت ارسال شد (در لاگ ثبت شد).",
        MessageKey::InvalidPhoneNumber => "شماره تلفن نامعتبر است.",
        MessageKey::RateLimitAddress => "تعداد درخواست‌ها از این IP بیش از حد مجاز است.",
        MessageKey::RateLimitPhone => "فقط یک درخواست در دقیقه مجاز است.",
        MessageKey::TransientFailure => "خطایی رخ داد. لطفاً دوباره تلاش کنید.",
        MessageKey::Verified => "تأیید شد",
        MessageKey::VerificationFailed => "کد نامعتبر است",
        MessageKey::ValidationError => "داده‌های درخواست نامعتبر است.",
        MessageKey::NotFound => "منبع درخواستی یافت نشد.",
    }
}
