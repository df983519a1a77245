// Unit tests for text normalization, lemmatization, and sentiment scoring.
//
// These exercise the public API through the library crate, the way the
// pipeline uses it.

use themetracker::sentiment::aggregate_mean;
use themetracker::sentiment::lexicon::LexiconScorer;
use themetracker::sentiment::traits::SentimentScorer;
use themetracker::text::lemma::lemmatize;
use themetracker::text::Normalizer;

// ============================================================
// Normalizer output invariants
// ============================================================

#[test]
fn tokens_are_lowercase_alphabetic_and_not_stopwords() {
    let normalizer = Normalizer::english();
    let text = "The MEANING of Life?! 42 reasons, a.k.a. why we're STILL searching — café philosophy";

    let tokens = normalizer.normalize(text);
    assert!(!tokens.is_empty());
    for token in &tokens {
        assert!(token.chars().count() >= 2, "too short: {token}");
        assert!(token.chars().all(char::is_alphabetic), "non-alphabetic: {token}");
        assert_eq!(token, &token.to_lowercase(), "not lowercase: {token}");
        assert!(!normalizer.is_stop_word(token), "stopword leaked: {token}");
    }
    assert!(tokens.contains(&"philosophy".to_string()));
    assert!(tokens.contains(&"café".to_string()));
    assert!(!tokens.iter().any(|t| t == "42"));
}

#[test]
fn empty_and_missing_text_give_no_tokens() {
    let normalizer = Normalizer::english();
    assert!(normalizer.normalize("").is_empty());
    assert!(normalizer.normalize("   \n\t ").is_empty());
    assert!(normalizer.normalize_opt(None).is_empty());
    assert!(normalizer.normalize("the and of a").is_empty());
}

#[test]
fn custom_stop_words_are_removed() {
    let normalizer = Normalizer::english().extend_stop_words(["reddit", "post"]);
    let tokens = normalizer.normalize("Reddit post about stoicism");
    assert_eq!(tokens, vec!["stoicism"]);
}

#[test]
fn plural_and_inflected_forms_collapse() {
    let normalizer = Normalizer::english();
    let tokens = normalizer.normalize("Journeys journey");
    assert_eq!(tokens, vec!["journey", "journey"]);
}

// ============================================================
// Lemmatizer spot checks
// ============================================================

#[test]
fn lemmatizer_common_forms() {
    assert_eq!(lemmatize("children"), "child");
    assert_eq!(lemmatize("stories"), "story");
    assert_eq!(lemmatize("thoughts"), "thought");
    assert_eq!(lemmatize("running"), "run");
    assert_eq!(lemmatize("inspired"), "inspire");
    assert_eq!(lemmatize("meaning"), "meaning");
    assert_eq!(lemmatize("consciousness"), "consciousness");
}

// ============================================================
// Sentiment
// ============================================================

#[test]
fn aggregate_mean_edge_cases() {
    assert_eq!(aggregate_mean(&[]), 0.0);
    assert_eq!(aggregate_mean(&[1.0, -1.0]), 0.0);
    assert!((aggregate_mean(&[0.5, 0.25, 0.0]) - 0.25).abs() < 1e-12);
}

#[test]
fn lexicon_scores_stay_in_range_and_have_sign() {
    let scorer = LexiconScorer::new();

    let positive = scorer.score("I love this, it made me so happy").unwrap();
    let negative = scorer.score("What a terrible, bad day").unwrap();
    let neutral = scorer.score("The table is in the kitchen").unwrap();
    let extreme = scorer.score("absolutely terrible terrible terrible").unwrap();

    assert!(positive > 0.0, "got {positive}");
    assert!(negative < 0.0, "got {negative}");
    assert_eq!(neutral, 0.0);
    assert!((-1.0..=1.0).contains(&extreme));
}

#[test]
fn negation_flips_polarity() {
    let scorer = LexiconScorer::new();
    let plain = scorer.score("happy").unwrap();
    let negated = scorer.score("not happy").unwrap();
    assert!(plain > 0.0);
    assert!(negated < 0.0);
}
