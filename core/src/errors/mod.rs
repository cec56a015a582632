//! Domain-specific error types and error handling.

mod store;

pub use store::StoreError;

use thiserror::Error;

use crate::domain::RateLimitScope;

/// Core domain errors raised inside the request pipeline
///
/// These never cross the `OtpLifecycleManager` boundary; they are folded
/// into an `OtpOutcome` there.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Rate limit exceeded for {scope}")]
    RateLimitExceeded { scope: RateLimitScope },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DomainResult<T> = Result<T, DomainError>;
