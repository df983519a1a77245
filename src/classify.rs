// Rule-based topic classifier.
//
// An ordered list of (pattern, label) rules evaluated against the lowercased
// title plus the first 200 characters of the lowercased description. The
// first rule whose pattern matches wins; nothing matching gives the fallback
// label. There is no scoring and no training: rule order is the whole model.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

/// Characters of description considered when classifying.
pub const DESCRIPTION_PREFIX_CHARS: usize = 200;

/// Label returned when no rule matches.
pub const DEFAULT_LABEL: &str = "general";

/// Built-in spirituality rules, most specific first.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    ("meditation|mindfulness", "Meditation/Mindfulness practice"),
    ("buddhis|zen|tao", "Eastern philosophy"),
    ("christian|jesus|bible|faith", "Christian spirituality"),
    ("islam|muslim|quran", "Islamic spirituality"),
    ("judaism|jewish|torah", "Jewish spirituality"),
    ("hindu|vedanta|yoga", "Hindu spirituality"),
    ("consciousness|awareness", "Consciousness exploration"),
    ("psychedelic|plant medicine|ayahuasca|dmt", "Psychedelic spirituality"),
    ("near death|afterlife|heaven", "Afterlife exploration"),
    ("science|physics|quantum", "Science and spirituality"),
];

/// One classification rule as written in a rules file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub label: String,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    label: String,
}

/// Ordered first-match-wins classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
    fallback: String,
}

impl Default for Classifier {
    fn default() -> Self {
        let specs = DEFAULT_RULES.iter().map(|(pattern, label)| RuleSpec {
            pattern: pattern.to_string(),
            label: label.to_string(),
        });
        // The built-in patterns are plain alternations and always compile
        Self::from_rules(specs).unwrap_or_else(|_| Self {
            rules: Vec::new(),
            fallback: DEFAULT_LABEL.to_string(),
        })
    }
}

impl Classifier {
    /// Compile rules in the given order. Fails on the first invalid pattern.
    pub fn from_rules<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = RuleSpec>,
    {
        let rules = specs
            .into_iter()
            .map(|spec| -> Result<Rule> {
                // Pattern text is kept as written: lowercasing would turn \B into \b
                let pattern = RegexBuilder::new(&spec.pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid rule pattern '{}'", spec.pattern))?;
                Ok(Rule {
                    pattern,
                    label: spec.label,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            fallback: DEFAULT_LABEL.to_string(),
        })
    }

    /// Load rules from a JSON array of `{ "pattern": ..., "label": ... }`.
    /// File order is rule order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let specs: Vec<RuleSpec> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;
        debug!(rules = specs.len(), path = %path.display(), "Parsed rules file");
        Self::from_rules(specs)
    }

    /// Replace the label returned when no rule matches.
    pub fn with_fallback(mut self, label: impl Into<String>) -> Self {
        self.fallback = label.into();
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Tag a (title, description) pair with a single topical label.
    pub fn classify(&self, title: &str, description: &str) -> String {
        let prefix: String = description.chars().take(DESCRIPTION_PREFIX_CHARS).collect();
        let haystack = format!("{} {}", title.to_lowercase(), prefix.to_lowercase());

        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&haystack))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}
