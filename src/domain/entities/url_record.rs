//! URL record entity mapping a short code to its original URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Resolution state of a URL record at a given instant.
///
/// The transition is one-way: once a record is `Expired` it never becomes
/// `Active` again. Both states are visible to stats; only `Active` records
/// redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStatus {
    Active,
    Expired,
}

/// A shortened URL.
///
/// `short_code` is the single addressable code of the record. When the caller
/// chose the code, `custom_alias` carries the same value; for generated codes
/// it is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: Uuid,
        original_url: String,
        short_code: String,
        custom_alias: Option<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            custom_alias,
            created_at,
            expires_at,
        }
    }

    /// Returns true once `now` is strictly past the expiration time.
    ///
    /// A record without an expiration never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Returns the resolution state of the record at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> UrlStatus {
        if self.is_expired_at(now) {
            UrlStatus::Expired
        } else {
            UrlStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>) -> UrlRecord {
        UrlRecord::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "abc123XY".to_string(),
            None,
            Utc::now(),
            expires_at,
        )
    }

    #[test]
    fn test_record_without_expiration_stays_active() {
        let record = record(None);
        let far_future = Utc::now() + Duration::days(36_500);

        assert!(!record.is_expired_at(far_future));
        assert_eq!(record.status_at(far_future), UrlStatus::Active);
    }

    #[test]
    fn test_record_expires_strictly_after_deadline() {
        let deadline = Utc::now();
        let record = record(Some(deadline));

        assert!(!record.is_expired_at(deadline));
        assert!(record.is_expired_at(deadline + Duration::milliseconds(1)));
        assert_eq!(
            record.status_at(deadline + Duration::seconds(1)),
            UrlStatus::Expired
        );
    }
}
