// Data models — the types that flow through the mining pipeline.
//
// Fetchers produce Items, the analyzer folds them into SourceSummaries, and
// the combiner merges summaries into a CombinedView. None of these are
// persisted; they live for a single run (or in the in-memory SummaryCache).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::themes::frequency::{Bigram, FrequencyTable};

/// One mined unit: a Reddit post or a YouTube video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Platform identifier (post id / video id), unique within one fetch
    pub id: String,
    pub title: String,
    /// Self-text or video description. Treated as empty when absent.
    pub body: Option<String>,
    pub engagement: Engagement,
    pub published_at: Option<DateTime<Utc>>,
    /// Post author or channel title
    pub author: Option<String>,
    /// Permalink or watch URL
    pub url: Option<String>,
    /// Label of the logical source this item was analyzed under.
    /// Set by the analyzer, never by a fetcher.
    pub source_tag: Option<String>,
    /// Topical label assigned by the rule-based classifier
    pub topic: Option<String>,
}

impl Item {
    /// The text the analyzer works on: title and body joined by a space.
    pub fn analysis_text(&self) -> String {
        format!("{} {}", self.title, self.body.as_deref().unwrap_or(""))
    }
}

/// Engagement counters. `score` is upvotes for posts and views for videos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub score: i64,
    pub comments: i64,
    pub likes: i64,
}

/// Sort items by engagement score, highest first. Stable for equal scores.
pub fn sort_by_engagement(items: &mut [Item]) {
    items.sort_by(|a, b| b.engagement.score.cmp(&a.engagement.score));
}

/// How far back a fetch should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Roughly the last week
    Recent,
    /// Roughly the last month
    Medium,
    /// Half a year (YouTube) or a year (Reddit's coarsest useful filter)
    Long,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Recent, TimeWindow::Medium, TimeWindow::Long];

    /// Reddit listing `t=` filter for this window.
    pub fn reddit_filter(self) -> &'static str {
        match self {
            TimeWindow::Recent => "week",
            TimeWindow::Medium => "month",
            TimeWindow::Long => "year",
        }
    }

    /// Look-back span used to compute YouTube's `publishedAfter`.
    pub fn lookback(self) -> Duration {
        match self {
            TimeWindow::Recent => Duration::weeks(1),
            TimeWindow::Medium => Duration::days(30),
            TimeWindow::Long => Duration::days(180),
        }
    }

    /// Earliest publish time included in this window, relative to `now`.
    pub fn published_after(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.lookback()
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Recent => "Last Week",
            TimeWindow::Medium => "Last Month",
            TimeWindow::Long => "Last 6 Months",
        }
    }

    /// Label matching the span Reddit actually returns for `reddit_filter`.
    pub fn reddit_label(self) -> &'static str {
        match self {
            TimeWindow::Long => "Last Year",
            other => other.label(),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recent" | "week" => Ok(TimeWindow::Recent),
            "medium" | "month" => Ok(TimeWindow::Medium),
            "long" | "year" | "6months" => Ok(TimeWindow::Long),
            other => anyhow::bail!(
                "unknown time window '{other}' (expected recent, medium or long)"
            ),
        }
    }
}

/// Aggregated analysis of one logical source (one subreddit, one time window).
///
/// Built once by `ThemeAnalyzer::build_summary` and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SourceSummary {
    pub label: String,
    /// Items in fetch order, each tagged with `label`
    pub items: Vec<Item>,
    pub unigram_freq: FrequencyTable<String>,
    pub bigram_freq: FrequencyTable<Bigram>,
    /// Mean per-item polarity, 0.0 when there are no items
    pub mean_sentiment: f64,
}

impl SourceSummary {
    /// An empty summary, which is what a failed or empty fetch contributes.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Per-source provenance kept alongside the merged lists.
#[derive(Debug, Clone, Serialize)]
pub struct SourceTerms {
    pub label: String,
    pub item_count: usize,
    pub mean_sentiment: f64,
    pub top_terms: Vec<(String, u32)>,
    pub top_bigrams: Vec<(Bigram, u32)>,
}

/// Multi-source merge of summaries, in the caller's source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CombinedView {
    /// Items from all sources, first occurrence of each id kept
    pub deduplicated_items: Vec<Item>,
    /// Per-source top terms concatenated in source order (not re-ranked)
    pub merged_top_terms: Vec<String>,
    /// Per-source top bigrams concatenated in source order (not re-ranked)
    pub merged_top_bigrams: Vec<Bigram>,
    pub sources: Vec<SourceTerms>,
}

impl CombinedView {
    /// Mean of the per-source sentiment means (0.0 with no sources).
    pub fn overall_sentiment(&self) -> f64 {
        let means: Vec<f64> = self.sources.iter().map(|s| s.mean_sentiment).collect();
        crate::sentiment::aggregate_mean(&means)
    }

    /// Count of deduplicated items per topic label, most common first.
    pub fn topic_breakdown(&self) -> Vec<(String, u32)> {
        let mut table = FrequencyTable::new();
        for item in &self.deduplicated_items {
            if let Some(topic) = &item.topic {
                table.add(topic.clone());
            }
        }
        table.ranked()
    }
}
