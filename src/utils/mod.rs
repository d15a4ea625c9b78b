//! Helpers shared by the HTTP layer, the store adapters and the engine.
//!
//! - [`code_generator`] - random short codes and custom alias validation
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`db_error`] - classification of PostgreSQL errors

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
