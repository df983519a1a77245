// Content fetcher trait — the boundary between the pipeline and a platform.
//
// A fetcher turns (source id, time window, limit) into Items. Reddit treats
// the source id as a subreddit name; YouTube treats it as a search query.
// The pipeline never lets a fetch failure escape: both error kinds become an
// empty source.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Item, TimeWindow};

/// Why a source produced no items.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Credentials, auth, or transport problem
    #[error("source {source_id} unavailable: {reason}")]
    SourceUnavailable { source_id: String, reason: String },
    /// The platform answered but had nothing for this source and window
    #[error("source {source_id} returned no items")]
    SourceEmpty { source_id: String },
}

impl FetchError {
    pub fn unavailable(source_id: &str, reason: impl ToString) -> Self {
        FetchError::SourceUnavailable {
            source_id: source_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty(source_id: &str) -> Self {
        FetchError::SourceEmpty {
            source_id: source_id.to_string(),
        }
    }
}

/// Trait for fetching items from a content platform.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Short platform name for logs and labels (e.g. "reddit").
    fn platform(&self) -> &'static str;

    /// Fetch up to `limit` items for `source_id` within `window`.
    async fn fetch(
        &self,
        source_id: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Item>, FetchError>;
}
