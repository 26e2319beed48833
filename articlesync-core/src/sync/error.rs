//! Sync error types.

use crate::host::HostError;

/// Errors that abort a fetch or sync.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Network failure or non-success HTTP status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Response body is not a JSON array of records
    #[error("Parse error: {0}")]
    Parse(String),

    /// Cancellation was requested while fetching
    #[error("Fetch cancelled")]
    Cancelled,

    /// The configured slug field is not part of the current schema
    #[error("No field matches the slug field id \"{0}\"")]
    MissingSlugField(String),

    /// A collection call failed
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Why a single item was left out of a sync.
///
/// These never abort a sync; they are logged and counted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Skipping item at index {index} because it doesn't have a slug value")]
    MissingSlug { index: usize },

    #[error("Skipping item at index {index} because its slug is not a non-empty string")]
    InvalidSlug { index: usize },
}

impl ValidationError {
    pub fn index(&self) -> usize {
        match self {
            ValidationError::MissingSlug { index } | ValidationError::InvalidSlug { index } => {
                *index
            }
        }
    }
}
