//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A short code mapped to its original URL
//! - [`RedirectLog`] - One append-only resolution event
//! - [`UrlStats`] - Derived aggregate over a record and its redirect log
//!
//! Records are built once by the engine and never mutated afterwards.

pub mod redirect_log;
pub mod stats;
pub mod url_record;

pub use redirect_log::RedirectLog;
pub use stats::UrlStats;
pub use url_record::{UrlRecord, UrlStatus};
