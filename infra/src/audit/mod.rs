//! Audit sink implementations backed by infrastructure services

mod tracing_sink;

pub use tracing_sink::TracingAuditSink;
