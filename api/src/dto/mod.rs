//! Data transfer objects for the HTTP API

pub mod otp;

pub use otp::{OtpRequest, OtpResponse, OtpVerifyRequest, OtpVerifyResponse};
