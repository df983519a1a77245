// Sentiment scorer trait — swap-ready abstraction.
//
// The analyzer only needs a polarity in [-1, 1] per text. The default
// implementation is a local lexicon; a model-backed scorer can be dropped in
// later without touching the aggregation code.

use anyhow::Result;

/// Trait for scoring the polarity of a text blob.
pub trait SentimentScorer: Send + Sync {
    /// Polarity of the whole text, from -1.0 (negative) to 1.0 (positive).
    fn score(&self, text: &str) -> Result<f64>;
}
