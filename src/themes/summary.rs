// Source aggregation — one SourceSummary per logical source.
//
// For each item: analysis text -> lemmas -> frequency tables, and analysis
// text -> polarity. A failing or non-finite polarity is logged and counted as
// neutral so one bad item never sinks the whole source.

use tracing::{debug, warn};

use crate::classify::Classifier;
use crate::models::{Item, SourceSummary};
use crate::sentiment::aggregate_mean;
use crate::sentiment::lexicon::LexiconScorer;
use crate::sentiment::traits::SentimentScorer;
use crate::text::Normalizer;

use super::frequency::aggregate;

/// Bundles the normalizer, sentiment scorer, and topic classifier used to
/// analyze a batch of items.
pub struct ThemeAnalyzer {
    normalizer: Normalizer,
    scorer: Box<dyn SentimentScorer>,
    classifier: Classifier,
}

impl Default for ThemeAnalyzer {
    fn default() -> Self {
        Self::new(
            Normalizer::english(),
            Box::new(LexiconScorer::new()),
            Classifier::default(),
        )
    }
}

impl ThemeAnalyzer {
    pub fn new(
        normalizer: Normalizer,
        scorer: Box<dyn SentimentScorer>,
        classifier: Classifier,
    ) -> Self {
        Self {
            normalizer,
            scorer,
            classifier,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Polarity of one text, degraded to 0.0 on failure.
    pub fn score_text(&self, text: &str) -> f64 {
        match self.scorer.score(text) {
            Ok(p) if p.is_finite() => p,
            Ok(p) => {
                warn!(polarity = p, "Non-finite sentiment score, treating as neutral");
                0.0
            }
            Err(e) => {
                warn!(error = %e, "Sentiment scoring failed, treating as neutral");
                0.0
            }
        }
    }

    /// Tag each item with its topical label.
    pub fn annotate_topics(&self, items: &mut [Item]) {
        for item in items.iter_mut() {
            let description = item.body.as_deref().unwrap_or("");
            item.topic = Some(self.classifier.classify(&item.title, description));
        }
    }

    /// Build the summary for one source. Never fails; no items gives empty
    /// tables and a neutral mean.
    pub fn build_summary(&self, label: &str, mut items: Vec<Item>) -> SourceSummary {
        for item in items.iter_mut() {
            item.source_tag = Some(label.to_string());
        }

        let texts: Vec<String> = items.iter().map(Item::analysis_text).collect();
        let sequences: Vec<Vec<String>> = texts
            .iter()
            .map(|text| self.normalizer.normalize(text))
            .collect();
        let (unigram_freq, bigram_freq) = aggregate(&sequences);

        let scores: Vec<f64> = texts.iter().map(|text| self.score_text(text)).collect();
        let mean_sentiment = aggregate_mean(&scores);

        debug!(
            source = label,
            items = items.len(),
            terms = unigram_freq.len(),
            bigrams = bigram_freq.len(),
            mean_sentiment,
            "Built source summary"
        );

        SourceSummary {
            label: label.to_string(),
            items,
            unigram_freq,
            bigram_freq,
            mean_sentiment,
        }
    }
}
