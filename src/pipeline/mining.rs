// Source mining: fetch -> classify -> summarize, one source at a time.
//
// Fetch failures never escape. An unavailable or empty source becomes an
// empty SourceSummary with a warning, and the remaining sources proceed.
// Successful summaries are stored in the SummaryCache and reused for the
// same (source, window) for the rest of the process.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::cache::{SourceKey, SummaryCache};
use crate::models::{SourceSummary, TimeWindow};
use crate::sources::traits::{ContentFetcher, FetchError};
use crate::themes::{ThemeAnalyzer, TopLimits};

/// Per-run parameters. Built once and only read afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub window: TimeWindow,
    /// Maximum items requested from each source
    pub limit: usize,
    pub limits: TopLimits,
}

impl RunContext {
    pub fn new(window: TimeWindow, limit: usize) -> Self {
        Self {
            window,
            limit,
            limits: TopLimits::default(),
        }
    }

    /// Same parameters, different window.
    pub fn with_window(self, window: TimeWindow) -> Self {
        Self { window, ..self }
    }
}

/// A source to mine and the label its summary should carry.
#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub source_id: String,
    pub label: String,
}

impl SourceRequest {
    pub fn new(source_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            label: label.into(),
        }
    }
}

/// Mine one source into a summary, consulting the cache first.
pub async fn mine_source(
    fetcher: &dyn ContentFetcher,
    analyzer: &ThemeAnalyzer,
    cache: &SummaryCache,
    ctx: &RunContext,
    request: &SourceRequest,
) -> Arc<SourceSummary> {
    let key = SourceKey::new(fetcher.platform(), &request.source_id, ctx.window);
    if let Some(hit) = cache.get(&key) {
        info!(source = %key.source, window = %ctx.window, "Using cached summary");
        return hit;
    }

    let mut items = match fetcher.fetch(&request.source_id, ctx.window, ctx.limit).await {
        Ok(items) => items,
        Err(e @ FetchError::SourceEmpty { .. }) => {
            warn!(source = %key.source, window = %ctx.window, error = %e, "No items, continuing with empty summary");
            return Arc::new(SourceSummary::empty(&request.label));
        }
        Err(e @ FetchError::SourceUnavailable { .. }) => {
            warn!(source = %key.source, window = %ctx.window, error = %e, "Source unavailable, continuing with empty summary");
            return Arc::new(SourceSummary::empty(&request.label));
        }
    };

    // Fetch order is kept; adapters already return their own ranking
    analyzer.annotate_topics(&mut items);

    let summary = Arc::new(analyzer.build_summary(&request.label, items));
    info!(
        source = %key.source,
        window = %ctx.window,
        items = summary.items.len(),
        terms = summary.unigram_freq.len(),
        sentiment = summary.mean_sentiment,
        "Source mined"
    );

    cache.insert(key, Arc::clone(&summary));
    summary
}

/// Mine several sources in order, with a progress bar. The returned
/// summaries are in the same order as `requests`.
pub async fn mine_sources(
    fetcher: &dyn ContentFetcher,
    analyzer: &ThemeAnalyzer,
    cache: &SummaryCache,
    ctx: &RunContext,
    requests: &[SourceRequest],
) -> Vec<Arc<SourceSummary>> {
    let pb = ProgressBar::new(requests.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Mining [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut summaries = Vec::with_capacity(requests.len());
    for request in requests {
        pb.set_message(request.label.clone());
        summaries.push(mine_source(fetcher, analyzer, cache, ctx, request).await);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let empty = summaries.iter().filter(|s| s.is_empty()).count();
    if empty > 0 {
        warn!(empty, total = summaries.len(), "Some sources produced no items");
    }
    summaries
}
