//! Request helpers and shared handlers

pub mod context;
pub mod error;

pub use context::RequestContext;
pub use error::{json_error_handler, not_found};
