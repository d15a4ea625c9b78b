//! Domain layer containing business entities and collaborator contracts.
//!
//! This module is independent of HTTP, SQL and process wiring. It defines the
//! records the engine works with and the traits through which the engine
//! reaches its collaborators.
//!
//! # Architecture
//!
//! - [`entities`] - URL records, redirect-log entries and the stats aggregate
//! - [`repositories`] - The storage contract ([`repositories::UrlRepository`])
//! - [`code_generator`] - Short code generation contract
//! - [`clock`] - Time source injected into the engine
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Not-found and uniqueness conflicts are tagged error variants, never
//!   inferred from error messages
//! - Collaborators are passed in explicitly (see
//!   [`crate::application::services::UrlService::new`])

pub mod clock;
pub mod code_generator;
pub mod entities;
pub mod repositories;
