//! Store adapters implementing [`crate::domain::repositories::UrlRepository`].
//!
//! - [`PgUrlRepository`] - PostgreSQL via SQLx
//! - [`InMemoryUrlRepository`] - process-local `DashMap`

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;

/// Embedded schema migrations for the PostgreSQL store.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
