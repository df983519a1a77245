// Sentiment scoring — trait-based abstraction plus a local lexicon scorer.

pub mod lexicon;
pub mod traits;

/// Arithmetic mean of per-item polarities; 0.0 for an empty slice.
pub fn aggregate_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
