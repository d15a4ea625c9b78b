//! Short code allocation, resolution and redirect statistics.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::application::error::ShortenerError;
use crate::domain::clock::Clock;
use crate::domain::code_generator::CodeGenerator;
use crate::domain::entities::{RedirectLog, UrlRecord, UrlStats, UrlStatus};
use crate::domain::repositories::{StoreError, UrlRepository};

/// Default bound on the code generation loop.
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: u32 = 32;

/// What a failed redirect-log write does to the redirect it belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedirectLogPolicy {
    /// The failure is logged and the redirect still succeeds.
    #[default]
    BestEffort,
    /// The failure fails the redirect with [`ShortenerError::Storage`].
    Strict,
}

impl FromStr for RedirectLogPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown redirect log policy '{other}', expected 'best_effort' or 'strict'"
            )),
        }
    }
}

/// Tunables of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub max_allocation_attempts: u32,
    pub redirect_log_policy: RedirectLogPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_allocation_attempts: DEFAULT_MAX_ALLOCATION_ATTEMPTS,
            redirect_log_policy: RedirectLogPolicy::default(),
        }
    }
}

/// The allocation and resolution engine.
///
/// Holds only shared collaborators and immutable options, so one instance
/// serves any number of concurrent requests. The lookup before insert is an
/// optimization: the store's insert-time conflict is what decides a race.
pub struct UrlService<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    options: EngineOptions,
}

impl<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> UrlService<R, G> {
    /// Creates a new engine over the given collaborators.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<G>,
        clock: Arc<dyn Clock>,
        options: EngineOptions,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            options,
        }
    }

    /// Allocates a short code for `original_url` and persists the record.
    ///
    /// An empty `custom_alias` is treated as absent. The URL is stored as
    /// given; callers validate and normalize it first.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::AliasConflict`] if the alias is taken, either at
    ///   lookup or at insert time
    /// - [`ShortenerError::AllocationExhausted`] if every generated candidate
    ///   collided
    /// - [`ShortenerError::RandomnessUnavailable`] if the generator failed
    /// - [`ShortenerError::Storage`] on any other store failure
    #[tracing::instrument(skip(self, original_url))]
    pub async fn create_short_url(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, ShortenerError> {
        match custom_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => self.create_with_alias(original_url, alias, expires_at).await,
            None => self.create_with_generated_code(original_url, expires_at).await,
        }
    }

    async fn create_with_alias(
        &self,
        original_url: String,
        alias: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, ShortenerError> {
        match self.repository.get_url(&alias).await {
            Ok(_) => {
                tracing::warn!(alias = %alias, "Custom alias already in use");
                return Err(ShortenerError::AliasConflict(alias));
            }
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(ShortenerError::Storage(e)),
        }

        let record =
            self.build_record(original_url, alias.clone(), Some(alias.clone()), expires_at);

        match self.repository.save_url(record).await {
            Ok(()) => {
                tracing::info!(code = %alias, "Short URL created with custom alias");
                metrics::counter!("shortener_codes_created_total", "kind" => "alias").increment(1);
                Ok(alias)
            }
            Err(StoreError::Conflict(_)) => {
                tracing::warn!(alias = %alias, "Custom alias taken by a concurrent insert");
                Err(ShortenerError::AliasConflict(alias))
            }
            Err(e) => Err(ShortenerError::Storage(e)),
        }
    }

    async fn create_with_generated_code(
        &self,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, ShortenerError> {
        let max_attempts = self.options.max_allocation_attempts;

        for attempt in 1..=max_attempts {
            let code = self.generator.generate()?;

            match self.repository.get_url(&code).await {
                Ok(_) => {
                    tracing::debug!(code = %code, attempt, "Generated code already in use");
                    metrics::counter!("shortener_allocation_collisions_total").increment(1);
                    continue;
                }
                Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(ShortenerError::Storage(e)),
            }

            let record = self.build_record(original_url.clone(), code.clone(), None, expires_at);

            match self.repository.save_url(record).await {
                Ok(()) => {
                    tracing::info!(code = %code, attempt, "Short URL created");
                    metrics::counter!("shortener_codes_created_total", "kind" => "generated")
                        .increment(1);
                    return Ok(code);
                }
                Err(StoreError::Conflict(_)) => {
                    tracing::debug!(code = %code, attempt, "Generated code taken at insert");
                    metrics::counter!("shortener_allocation_collisions_total").increment(1);
                }
                Err(e) => return Err(ShortenerError::Storage(e)),
            }
        }

        tracing::error!(attempts = max_attempts, "Short code allocation exhausted");
        Err(ShortenerError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    fn build_record(
        &self,
        original_url: String,
        code: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> UrlRecord {
        UrlRecord::new(
            Uuid::new_v4(),
            original_url,
            code,
            custom_alias,
            self.clock.now(),
            expires_at.map(|at| at.trunc_subsecs(6)),
        )
    }

    /// Resolves a code to its original URL without side effects.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if no record has this code
    /// - [`ShortenerError::Expired`] if `now` is past the record's expiration
    /// - [`ShortenerError::Storage`] on any other store failure
    pub async fn get_original_url(&self, code: &str) -> Result<String, ShortenerError> {
        let record = self
            .repository
            .get_url(code)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(code) => ShortenerError::NotFound(code),
                other => ShortenerError::Storage(other),
            })?;

        match record.status_at(self.clock.now()) {
            UrlStatus::Active => Ok(record.original_url),
            UrlStatus::Expired => {
                tracing::debug!(code = %code, "Short code expired");
                Err(ShortenerError::Expired(code.to_string()))
            }
        }
    }

    /// Appends one redirect-log entry for `code`.
    ///
    /// Every call appends; an empty referrer is stored as absent. The code is
    /// not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] if the write fails.
    pub async fn log_redirect(
        &self,
        code: &str,
        referrer: Option<String>,
    ) -> Result<(), ShortenerError> {
        let entry = RedirectLog::new(Uuid::new_v4(), code.to_string(), self.clock.now(), referrer);

        self.repository.save_redirect_log(entry).await?;
        metrics::counter!("shortener_redirects_logged_total").increment(1);

        Ok(())
    }

    /// Resolves a code for a redirect and records the access.
    ///
    /// Nothing is logged when resolution fails. A failed log write is handled
    /// according to the configured [`RedirectLogPolicy`].
    ///
    /// # Errors
    ///
    /// See [`Self::get_original_url`]. Under [`RedirectLogPolicy::Strict`] a
    /// failed log write is returned as [`ShortenerError::Storage`].
    pub async fn resolve_redirect(
        &self,
        code: &str,
        referrer: Option<String>,
    ) -> Result<String, ShortenerError> {
        let original_url = self.get_original_url(code).await?;

        if let Err(e) = self.log_redirect(code, referrer).await {
            metrics::counter!("shortener_redirect_log_failures_total", "kind" => e.kind())
                .increment(1);

            match self.options.redirect_log_policy {
                RedirectLogPolicy::BestEffort => {
                    tracing::warn!(
                        code = %code,
                        kind = e.kind(),
                        error = %e,
                        "Failed to log redirect"
                    );
                }
                RedirectLogPolicy::Strict => {
                    tracing::error!(
                        code = %code,
                        kind = e.kind(),
                        error = %e,
                        "Failed to log redirect"
                    );
                    return Err(e);
                }
            }
        }

        Ok(original_url)
    }

    /// Aggregates redirect statistics for `code`.
    ///
    /// Expired records still report stats.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::NotFound`] if no record has this code
    /// - [`ShortenerError::Storage`] on any other store failure
    pub async fn get_stats(&self, code: &str) -> Result<UrlStats, ShortenerError> {
        let mut stats = self
            .repository
            .get_stats(code)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(code) => ShortenerError::NotFound(code),
                other => ShortenerError::Storage(other),
            })?;

        stats.normalize_referrers();
        Ok(stats)
    }

    /// Checks that the store is reachable.
    pub async fn check_storage(&self) -> Result<(), ShortenerError> {
        self.repository.ping().await.map_err(ShortenerError::Storage)
    }
}
