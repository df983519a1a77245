// Text normalizer — turns one text blob into a sequence of lemmas.
//
// lowercase -> UAX #29 word segmentation -> clitic strip -> filter (alphabetic, stopwords,
// length) -> lemmatize -> filter again. The second filter pass keeps the
// output invariant even when a lemma lands on a stopword ("others" -> "other").

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::lemma::lemmatize;

/// Contraction and possessive endings split off before filtering, in both
/// apostrophe forms. The bare apostrophe goes last.
const CLITICS: &[&str] = &[
    "n't", "n\u{2019}t", "'s", "\u{2019}s", "'re", "\u{2019}re", "'ve", "\u{2019}ve", "'ll",
    "\u{2019}ll", "'d", "\u{2019}d", "'m", "\u{2019}m", "'", "\u{2019}",
];

/// Drop a trailing possessive or contraction ("world's" -> "world").
fn strip_clitic(word: &str) -> &str {
    match word {
        "can't" | "can\u{2019}t" => return "can",
        "won't" | "won\u{2019}t" => return "will",
        _ => {}
    }
    CLITICS
        .iter()
        .find_map(|c| word.strip_suffix(c))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(word)
}

/// Tokenizer + stopword filter + lemmatizer for one language.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }

    /// Build a normalizer with an explicit stopword list (lowercased on entry).
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Add domain-specific stopwords on top of the base list.
    pub fn extend_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Normalize an optional text. Absent text yields no tokens.
    pub fn normalize_opt(&self, text: Option<&str>) -> Vec<String> {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    /// Normalize one text blob into lemmas.
    ///
    /// Empty or whitespace-only input yields an empty sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lower = text.to_lowercase();
        let tokens: Vec<String> = lower
            .unicode_words()
            .map(strip_clitic)
            .filter(|w| self.keep(w))
            .map(lemmatize)
            .filter(|lemma| self.keep(lemma))
            .collect();

        if tokens.is_empty() {
            debug!(
                chars = text.chars().count(),
                "Text produced no tokens after filtering"
            );
        }

        tokens
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() > 1
            && token.chars().all(char::is_alphabetic)
            && !self.stop_words.contains(token)
    }
}
