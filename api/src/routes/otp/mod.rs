//! OTP endpoints

pub mod request;
pub mod verify;

pub use request::request_otp;
pub use verify::verify_otp;
