//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into engine operations and formats responses.
//!
//! - [`dto`] - request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - rate limiting, CORS and tracing
//! - [`routes`] - route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
