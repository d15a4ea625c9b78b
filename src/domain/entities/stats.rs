//! Redirect statistics aggregate.

use chrono::{DateTime, Utc};

/// Aggregated redirect statistics for a short code.
///
/// Computed on demand from the URL record and its redirect-log entries; never
/// persisted. A code with no redirects has `redirect_count == 0`, no
/// `last_accessed` and an empty `referrers` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStats {
    pub created_at: DateTime<Utc>,
    pub redirect_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    /// Distinct non-empty referrers. Order carries no meaning.
    pub referrers: Vec<String>,
}

impl UrlStats {
    /// Creates stats for a code that has never been resolved.
    pub fn empty(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            redirect_count: 0,
            last_accessed: None,
            referrers: Vec::new(),
        }
    }

    /// Drops empty referrers and duplicates.
    ///
    /// The result is sorted so equal aggregates compare equal.
    pub fn normalize_referrers(&mut self) {
        self.referrers.retain(|r| !r.is_empty());
        self.referrers.sort_unstable();
        self.referrers.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let now = Utc::now();
        let stats = UrlStats::empty(now);

        assert_eq!(stats.created_at, now);
        assert_eq!(stats.redirect_count, 0);
        assert!(stats.last_accessed.is_none());
        assert!(stats.referrers.is_empty());
    }

    #[test]
    fn test_normalize_referrers_removes_duplicates_and_blanks() {
        let mut stats = UrlStats::empty(Utc::now());
        stats.referrers = vec![
            "https://b.com".to_string(),
            String::new(),
            "https://a.com".to_string(),
            "https://b.com".to_string(),
        ];

        stats.normalize_referrers();

        assert_eq!(stats.referrers, vec!["https://a.com", "https://b.com"]);
    }
}
