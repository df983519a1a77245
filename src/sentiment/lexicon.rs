// Lexicon-based polarity scorer.
//
// Each word found in the lexicon contributes its polarity. An intensifier
// directly before the word scales it; a negator within the three preceding
// tokens flips and halves it. The text's polarity is the mean contribution,
// clamped to [-1, 1]. Text with no lexicon hits is neutral.

use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use super::traits::SentimentScorer;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../../data/sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).unwrap_or_default()
});

/// How much a negated word's polarity is scaled by (sign flip plus damping).
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity scorer backed by the embedded word lexicon.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64> {
        Ok(polarity(text, &LEXICON))
    }
}

/// Score `text` against an arbitrary lexicon.
pub fn polarity(text: &str, lexicon: &HashMap<String, f64>) -> f64 {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower.unicode_words().collect();

    let mut sum = 0.0;
    let mut hits = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(&base) = lexicon.get(*token) else {
            continue;
        };

        let mut value = base;
        if i >= 1 {
            if let Some(mult) = intensifier(tokens[i - 1]) {
                value *= mult;
            }
        }
        let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k]));
        if negated {
            value *= NEGATION_FACTOR;
        }

        sum += value;
        hits += 1;
    }

    if hits == 0 {
        return 0.0;
    }
    (sum / hits as f64).clamp(-1.0, 1.0)
}

fn intensifier(token: &str) -> Option<f64> {
    match token {
        "very" | "really" | "so" | "truly" => Some(1.3),
        "extremely" | "incredibly" | "absolutely" => Some(1.5),
        "quite" | "pretty" => Some(1.1),
        "slightly" | "somewhat" => Some(0.6),
        _ => None,
    }
}

fn is_negator(token: &str) -> bool {
    matches!(
        token,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "don't"
            | "doesn't"
            | "didn't"
            | "without"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_loads() {
        assert!(!LEXICON.is_empty());
    }

    #[test]
    fn positive_and_negative_text() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("What a wonderful and happy day").unwrap() > 0.0);
        assert!(scorer.score("This is terrible and sad").unwrap() < 0.0);
    }

    #[test]
    fn neutral_without_hits() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("the cat sat on the mat").unwrap(), 0.0);
        assert_eq!(scorer.score("").unwrap(), 0.0);
    }

    #[test]
    fn negation_flips_sign() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("I am not happy").unwrap() < 0.0);
        assert!(scorer.score("this is not bad at all").unwrap() > 0.0);
    }

    #[test]
    fn intensifier_clamps_to_range() {
        let lexicon: HashMap<String, f64> = [("perfect".to_string(), 1.0)].into_iter().collect();
        let p = polarity("absolutely perfect", &lexicon);
        assert_eq!(p, 1.0);
    }
}
