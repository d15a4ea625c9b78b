//! Application layer: the allocation and resolution engine.
//!
//! Services consume the domain traits (store, code generator, clock) and
//! expose the operations HTTP handlers and the admin CLI call.
//!
//! - [`services::url_service::UrlService`] - code allocation, resolution, redirect logging
//!   and stats
//! - [`error::ShortenerError`] - engine error kinds

pub mod error;
pub mod services;

pub use error::ShortenerError;
