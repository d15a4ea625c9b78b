//! DTOs for redirect statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlStats;

/// Redirect statistics for one short code.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub code: String,
    pub redirect_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<DateTime<Utc>>,
    pub referrers: Vec<String>,
}

impl StatsResponse {
    pub fn new(code: String, stats: UrlStats) -> Self {
        Self {
            code,
            redirect_count: stats.redirect_count,
            created_at: stats.created_at,
            last_accessed: stats.last_accessed,
            referrers: stats.referrers,
        }
    }
}
