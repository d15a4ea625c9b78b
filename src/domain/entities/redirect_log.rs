//! Redirect-log entry representing a single resolution event.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One access to a short code.
///
/// Entries are append-only. `short_code` is a plain string key rather than a
/// link to the owning [`super::UrlRecord`], so an entry stays valid whatever
/// happens to the record later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectLog {
    pub id: Uuid,
    pub short_code: String,
    pub accessed_at: DateTime<Utc>,
    pub referrer: Option<String>,
}

impl RedirectLog {
    /// Creates a new RedirectLog instance.
    ///
    /// An empty referrer is stored as `None`.
    pub fn new(
        id: Uuid,
        short_code: String,
        accessed_at: DateTime<Utc>,
        referrer: Option<String>,
    ) -> Self {
        Self {
            id,
            short_code,
            accessed_at,
            referrer: referrer.filter(|r| !r.is_empty()),
        }
    }
}
