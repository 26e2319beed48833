//! Remote data source readers.

mod article;
mod cancel;
mod client;

use async_trait::async_trait;

use crate::models::DataSource;
use crate::sync::SyncError;

pub use article::{article_fields, article_to_item, field_ids};
pub use cancel::CancelSignal;
pub use client::{ArticlesClient, DEFAULT_ARTICLES_URL};

/// Data source id the articles API is registered under.
pub const ARTICLES_DATA_SOURCE_ID: &str = "articles";

/// Fetches a data source snapshot.
///
/// Implementations fail with `SyncError::Fetch` on transport or status
/// errors, `SyncError::Parse` on a malformed body, and `SyncError::Cancelled`
/// when the signal fires before the snapshot is complete.
#[async_trait]
pub trait DataSourceReader: Send + Sync {
    async fn fetch(
        &self,
        data_source_id: &str,
        cancel: Option<&CancelSignal>,
    ) -> Result<DataSource, SyncError>;
}
