//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{EngineOptions, UrlService};
use crate::domain::clock::SystemClock;
use crate::domain::repositories::UrlRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// The engine as wired into the HTTP layer: any store, OS randomness.
pub type UrlEngine = UrlService<dyn UrlRepository, RandomCodeGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlEngine>,
    pub base_url: Arc<str>,
}

impl AppState {
    /// Builds the state around a store with the production generator and clock.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        options: EngineOptions,
        base_url: &str,
    ) -> Self {
        let url_service = UrlService::new(
            repository,
            Arc::new(RandomCodeGenerator),
            Arc::new(SystemClock),
            options,
        );

        Self {
            url_service: Arc::new(url_service),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
