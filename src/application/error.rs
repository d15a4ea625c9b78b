//! Error kinds reported by the allocation and resolution engine.

use crate::domain::code_generator::GeneratorError;
use crate::domain::repositories::StoreError;

/// Failure of an engine operation.
///
/// Store not-found and insert-time conflicts are translated into the
/// matching kinds here; every other store failure surfaces as `Storage`.
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    #[error("custom alias already in use: {0}")]
    AliasConflict(String),

    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("short code not found: {0}")]
    NotFound(String),

    #[error("short code expired: {0}")]
    Expired(String),

    #[error("storage error: {0}")]
    Storage(#[source] StoreError),

    #[error(transparent)]
    RandomnessUnavailable(#[from] GeneratorError),
}

impl ShortenerError {
    /// Stable machine-readable name of the kind, used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AliasConflict(_) => "alias_conflict",
            Self::AllocationExhausted { .. } => "allocation_exhausted",
            Self::NotFound(_) => "not_found",
            Self::Expired(_) => "expired",
            Self::Storage(_) => "storage_error",
            Self::RandomnessUnavailable(_) => "randomness_unavailable",
        }
    }
}

impl From<StoreError> for ShortenerError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err)
    }
}
