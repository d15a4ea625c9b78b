//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{RedirectLog, UrlRecord, UrlStats};
use crate::domain::repositories::{StoreError, UrlRepository};

/// Process-local repository backed by `DashMap`.
///
/// Used by `STORAGE_BACKEND=memory` and by tests. Inserting a record holds the
/// shard lock for its code across the check and the write, so two racing
/// saves of the same code cannot both succeed. Expired records are kept, like
/// the PostgreSQL rows.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    urls: DashMap<String, UrlRecord>,
    logs: DashMap<String, Vec<RedirectLog>>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored URL records.
    pub fn url_count(&self) -> usize {
        self.urls.len()
    }

    /// Number of redirect-log entries stored for `short_code`.
    pub fn redirect_log_count(&self, short_code: &str) -> usize {
        self.logs.get(short_code).map_or(0, |entries| entries.len())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save_url(&self, record: UrlRecord) -> Result<(), StoreError> {
        match self.urls.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(record.short_code)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get_url(&self, short_code: &str) -> Result<UrlRecord, StoreError> {
        self.urls
            .get(short_code)
            .map(|record| record.clone())
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))
    }

    async fn save_redirect_log(&self, entry: RedirectLog) -> Result<(), StoreError> {
        self.logs
            .entry(entry.short_code.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn get_stats(&self, short_code: &str) -> Result<UrlStats, StoreError> {
        let created_at = self
            .urls
            .get(short_code)
            .map(|record| record.created_at)
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))?;

        let mut stats = UrlStats::empty(created_at);

        if let Some(entries) = self.logs.get(short_code) {
            stats.redirect_count = entries.len() as i64;
            stats.last_accessed = entries.iter().map(|e| e.accessed_at).max();
            stats.referrers = entries.iter().filter_map(|e| e.referrer.clone()).collect();
        }

        stats.normalize_referrers();
        Ok(stats)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
