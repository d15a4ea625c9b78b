//! HTTP middleware for request processing and protection.

pub mod cors;
pub mod rate_limit;
pub mod tracing;
