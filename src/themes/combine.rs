// Cross-source combination.
//
// Sources are visited in the caller's order. Items are deduplicated by id,
// keeping the first occurrence and tagging it with the source it was kept
// from. Each source contributes its own top-K terms and top-J bigrams, and
// those lists are concatenated in source order with no global re-ranking, so
// every configured source is represented in what comes out.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{CombinedView, SourceSummary, SourceTerms};

/// How many terms and bigrams each source contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLimits {
    pub terms: usize,
    pub bigrams: usize,
}

impl Default for TopLimits {
    fn default() -> Self {
        Self {
            terms: 5,
            bigrams: 3,
        }
    }
}

/// Merge summaries into a single view, in iteration order.
pub fn combine<'a, I>(summaries: I, limits: TopLimits) -> CombinedView
where
    I: IntoIterator<Item = &'a SourceSummary>,
{
    let mut view = CombinedView::default();
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut duplicates = 0usize;

    for summary in summaries {
        for item in &summary.items {
            if !seen.insert(item.id.as_str()) {
                duplicates += 1;
                continue;
            }
            let mut kept = item.clone();
            kept.source_tag = Some(summary.label.clone());
            view.deduplicated_items.push(kept);
        }

        let top_terms = summary.unigram_freq.top(limits.terms);
        let top_bigrams = summary.bigram_freq.top(limits.bigrams);

        view.merged_top_terms
            .extend(top_terms.iter().map(|(term, _)| term.clone()));
        view.merged_top_bigrams
            .extend(top_bigrams.iter().map(|(bigram, _)| bigram.clone()));

        view.sources.push(SourceTerms {
            label: summary.label.clone(),
            item_count: summary.items.len(),
            mean_sentiment: summary.mean_sentiment,
            top_terms,
            top_bigrams,
        });
    }

    debug!(
        sources = view.sources.len(),
        items = view.deduplicated_items.len(),
        duplicates,
        terms = view.merged_top_terms.len(),
        bigrams = view.merged_top_bigrams.len(),
        "Combined source summaries"
    );

    view
}
