// Composition tests — verifying that the pipeline stages chain together.
//
// These tests exercise the data flow between modules:
//   Fetcher -> Classifier -> Summary -> Cache -> Combine -> Synthesize / Prompt
// using in-memory stub fetchers and generators, without any network calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use themetracker::generate::generate_lecture_themes;
use themetracker::generate::prompt::AgeGroup;
use themetracker::generate::traits::TextGenerator;
use themetracker::models::{Item, TimeWindow};
use themetracker::pipeline::{mine_source, mine_sources, RunContext, SourceRequest, SummaryCache};
use themetracker::classify::Classifier;
use themetracker::sentiment::lexicon::LexiconScorer;
use themetracker::sources::traits::{ContentFetcher, FetchError};
use themetracker::text::Normalizer;
use themetracker::themes::{combine, synthesize, ThemeAnalyzer, TopLimits};

// ============================================================
// Stubs
// ============================================================

enum Canned {
    Items(Vec<Item>),
    Unavailable,
    Empty,
}

/// Fetcher that serves canned responses per source id and counts calls.
struct StubFetcher {
    responses: HashMap<String, Canned>,
    calls: AtomicUsize,
}

impl StubFetcher {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn with(mut self, source_id: &str, canned: Canned) -> Self {
        self.responses.insert(source_id.to_string(), canned);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    fn platform(&self) -> &'static str {
        "stub"
    }

    async fn fetch(
        &self,
        source_id: &str,
        _window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Item>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(source_id) {
            Some(Canned::Items(items)) => Ok(items.iter().take(limit).cloned().collect()),
            Some(Canned::Empty) | None => Err(FetchError::empty(source_id)),
            Some(Canned::Unavailable) => {
                Err(FetchError::unavailable(source_id, "401 Unauthorized"))
            }
        }
    }
}

/// Generator that records the prompt and replies (or fails) on cue.
struct StubGenerator {
    reply: Option<String>,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            last_prompt: Mutex::new(None),
        }
    }

    fn prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("quota exceeded"),
        }
    }
}

fn item(id: &str, title: &str, body: Option<&str>, score: i64) -> Item {
    let mut item = Item {
        id: id.to_string(),
        title: title.to_string(),
        body: body.map(String::from),
        ..Default::default()
    };
    item.engagement.score = score;
    item
}

fn ctx() -> RunContext {
    RunContext::new(TimeWindow::Recent, 100)
}

// ============================================================
// Chain: Fetch -> Summary
// ============================================================

#[tokio::test]
async fn purpose_growth_mindset_counts() {
    let fetcher = StubFetcher::new().with(
        "Existentialism",
        Canned::Items(vec![
            item("1", "Finding Purpose", None, 10),
            item("2", "Purpose and Growth", None, 20),
            item("3", "Growth Mindset", None, 30),
        ]),
    );
    // Minimal stopword list so "find" is counted whatever the bundled list holds
    let analyzer = ThemeAnalyzer::new(
        Normalizer::with_stop_words(["and"]),
        Box::new(LexiconScorer::new()),
        Classifier::default(),
    );
    let cache = SummaryCache::new();
    let request = SourceRequest::new("Existentialism", "r/Existentialism");

    let summary = mine_source(&fetcher, &analyzer, &cache, &ctx(), &request).await;

    // "Finding" reduces to its lemma
    assert_eq!(summary.unigram_freq.get(&"find".to_string()), 1);
    assert_eq!(summary.unigram_freq.get(&"finding".to_string()), 0);
    assert_eq!(summary.unigram_freq.get(&"purpose".to_string()), 2);
    assert_eq!(summary.unigram_freq.get(&"growth".to_string()), 2);
    assert_eq!(summary.unigram_freq.get(&"mindset".to_string()), 1);

    let bigram = |a: &str, b: &str| (a.to_string(), b.to_string());
    assert_eq!(summary.bigram_freq.get(&bigram("purpose", "growth")), 1);
    assert_eq!(summary.bigram_freq.get(&bigram("growth", "mindset")), 1);
    // These would only exist if bigrams spanned item boundaries
    assert_eq!(summary.bigram_freq.get(&bigram("purpose", "purpose")), 0);
    assert_eq!(summary.bigram_freq.get(&bigram("growth", "growth")), 0);

    // Fetch order kept (engagement is ascending here) and tagged with the source
    let ids: Vec<&str> = summary.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(summary
        .items
        .iter()
        .all(|i| i.source_tag.as_deref() == Some("r/Existentialism")));
    assert!(summary.items.iter().all(|i| i.topic.is_some()));
}

#[tokio::test]
async fn failing_sources_become_empty_and_others_proceed() {
    let fetcher = StubFetcher::new()
        .with("Broken", Canned::Unavailable)
        .with("Quiet", Canned::Empty)
        .with(
            "Stoicism",
            Canned::Items(vec![item("s1", "Daily stoic practice", None, 5)]),
        );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();
    let requests = vec![
        SourceRequest::new("Broken", "r/Broken"),
        SourceRequest::new("Stoicism", "r/Stoicism"),
        SourceRequest::new("Quiet", "r/Quiet"),
    ];

    let summaries = mine_sources(&fetcher, &analyzer, &cache, &ctx(), &requests).await;

    assert_eq!(summaries.len(), 3);
    assert!(summaries[0].is_empty());
    assert_eq!(summaries[0].label, "r/Broken");
    assert_eq!(summaries[0].mean_sentiment, 0.0);
    assert_eq!(summaries[1].items.len(), 1);
    assert!(summaries[2].is_empty());

    // Failed fetches aren't cached; the good one is
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn cache_serves_repeat_requests_per_window() {
    let fetcher = StubFetcher::new().with(
        "zen",
        Canned::Items(vec![item("v1", "Zen in daily life", None, 100)]),
    );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();
    let request = SourceRequest::new("zen", "Last Week");

    let first = mine_source(&fetcher, &analyzer, &cache, &ctx(), &request).await;
    let second = mine_source(&fetcher, &analyzer, &cache, &ctx(), &request).await;
    assert_eq!(fetcher.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    // A different window is a different cache entry
    let month = ctx().with_window(TimeWindow::Medium);
    mine_source(&fetcher, &analyzer, &cache, &month, &request).await;
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn limit_is_passed_to_fetcher() {
    let items: Vec<Item> = (0..20)
        .map(|i| item(&format!("p{i}"), "Meaning of life", None, i))
        .collect();
    let fetcher = StubFetcher::new().with("Philosophy", Canned::Items(items));
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();

    let small = RunContext::new(TimeWindow::Long, 5);
    let summary = mine_source(
        &fetcher,
        &analyzer,
        &cache,
        &small,
        &SourceRequest::new("Philosophy", "r/Philosophy"),
    )
    .await;
    assert_eq!(summary.items.len(), 5);
}

// ============================================================
// Chain: Summaries -> Combine -> Synthesize
// ============================================================

#[tokio::test]
async fn windows_combine_with_first_seen_provenance() {
    let fetcher = StubFetcher::new()
        .with("week", Canned::Items(vec![item("v1", "Zen meditation", None, 50)]))
        .with(
            "month",
            Canned::Items(vec![
                item("v1", "Zen meditation", None, 50),
                item("v2", "Bible study", None, 10),
            ]),
        );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();

    let week = mine_source(&fetcher, &analyzer, &cache, &ctx(), &SourceRequest::new("week", "Last Week")).await;
    let month = mine_source(&fetcher, &analyzer, &cache, &ctx(), &SourceRequest::new("month", "Last Month")).await;

    let view = combine([week.as_ref(), month.as_ref()], TopLimits::default());

    let v1: Vec<&Item> = view.deduplicated_items.iter().filter(|i| i.id == "v1").collect();
    assert_eq!(v1.len(), 1);
    assert_eq!(v1[0].source_tag.as_deref(), Some("Last Week"));
    assert_eq!(view.deduplicated_items.len(), 2);

    let breakdown = view.topic_breakdown();
    assert!(breakdown.contains(&("Meditation/Mindfulness practice".to_string(), 1)));
    assert!(breakdown.contains(&("Christian spirituality".to_string(), 1)));
}

#[tokio::test]
async fn subreddits_to_speech_titles() {
    let fetcher = StubFetcher::new()
        .with(
            "Existentialism",
            Canned::Items(vec![
                item("e1", "Meaning and freedom", Some("Absurd freedom, absurd meaning"), 3),
                item("e2", "Anxiety of freedom", None, 2),
            ]),
        )
        .with(
            "SelfImprovement",
            Canned::Items(vec![
                item("s1", "Daily habits build discipline", None, 9),
                item("s2", "Daily habits matter", Some("discipline beats motivation"), 8),
            ]),
        );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();
    let requests = vec![
        SourceRequest::new("Existentialism", "r/Existentialism"),
        SourceRequest::new("SelfImprovement", "r/SelfImprovement"),
    ];

    let summaries = mine_sources(&fetcher, &analyzer, &cache, &ctx(), &requests).await;
    let view = combine(summaries.iter().map(Arc::as_ref), TopLimits::default());

    assert!(view.merged_top_terms.len() >= 5);
    assert!(view.merged_top_bigrams.len() >= 3);
    // Source order is preserved: the first merged term comes from r/Existentialism
    let first_source_terms = &view.sources[0].top_terms;
    assert_eq!(view.merged_top_terms[0], first_source_terms[0].0);

    let titles = synthesize(&view.merged_top_terms, &view.merged_top_bigrams).unwrap();
    assert_eq!(titles.len(), 10);
    assert!(titles[0].starts_with("The Quest for Meaning: "));

    let again = synthesize(&view.merged_top_terms, &view.merged_top_bigrams).unwrap();
    assert_eq!(titles, again);
}

#[tokio::test]
async fn thin_data_reports_missing_slot() {
    let fetcher = StubFetcher::new().with(
        "Tiny",
        Canned::Items(vec![item("t1", "Purpose", None, 1)]),
    );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();

    let summary = mine_source(&fetcher, &analyzer, &cache, &ctx(), &SourceRequest::new("Tiny", "r/Tiny")).await;
    let view = combine([summary.as_ref()], TopLimits::default());

    let err = synthesize(&view.merged_top_terms, &view.merged_top_bigrams).unwrap_err();
    assert_eq!(err.slot, 1);
    assert_eq!(err.available, 1);
}

// ============================================================
// Chain: Combine -> Prompt -> Generator
// ============================================================

#[tokio::test]
async fn lecture_prompt_carries_titles_and_audience() {
    let fetcher = StubFetcher::new().with(
        "q",
        Canned::Items(vec![
            item("v1", "Morning meditation for beginners", None, 900),
            item("v2", "Near death experiences explained", None, 800),
        ]),
    );
    let analyzer = ThemeAnalyzer::default();
    let cache = SummaryCache::new();
    let summary = mine_source(&fetcher, &analyzer, &cache, &ctx(), &SourceRequest::new("q", "Last Week")).await;
    let view = combine([summary.as_ref()], TopLimits::default());

    let generator = StubGenerator::replying("1. **Stillness in a Loud World**");
    let out = generate_lecture_themes(&generator, &view, AgeGroup::Forties, None).await;

    assert_eq!(out, "1. **Stillness in a Loud World**");
    let prompt = generator.prompt();
    assert!(prompt.contains("- Morning meditation for beginners (Meditation/Mindfulness practice)"));
    assert!(prompt.contains("- Near death experiences explained (Afterlife exploration)"));
    assert!(prompt.contains("people aged 40-50 years"));
    assert!(prompt.contains("mid-life reflection"));
}

#[tokio::test]
async fn long_philosophy_context_is_capped() {
    let view = combine(std::iter::empty(), TopLimits::default());
    let context = "w".repeat(25_000);

    let generator = StubGenerator::replying("ok");
    generate_lecture_themes(&generator, &view, AgeGroup::Twenties, Some(&context)).await;

    let prompt = generator.prompt();
    assert!(prompt.contains(&format!("{}...", "w".repeat(10_000))));
    assert!(!prompt.contains(&"w".repeat(10_001)));
}

#[tokio::test]
async fn generator_failure_becomes_message() {
    let view = combine(std::iter::empty(), TopLimits::default());
    let generator = StubGenerator::failing();

    let out = generate_lecture_themes(&generator, &view, AgeGroup::SixtyPlus, None).await;
    assert!(out.starts_with("Error generating lecture themes: "));
    assert!(out.contains("quota exceeded"));
}
