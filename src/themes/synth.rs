// Template synthesizer — speech titles from ranked term and bigram slots.
//
// Each template is a fixed sequence of literal text and numbered slots. The
// whole template set is checked against the available data before anything
// is rendered: a missing slot is reported by name rather than producing a
// truncated or padded list.

use std::fmt;

use thiserror::Error;

use super::frequency::Bigram;

/// Which ranked list a slot reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Term,
    Bigram,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Term => f.write_str("term"),
            SlotKind::Bigram => f.write_str("bigram"),
        }
    }
}

/// A template referenced a slot the data can't fill.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough data to fill {kind} slot {slot}: only {available} {kind}s available")]
pub struct InsufficientDataError {
    pub kind: SlotKind,
    pub slot: usize,
    pub available: usize,
}

/// One piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Text(&'static str),
    /// Title-cased term at this index
    Term(usize),
    /// Both words of the bigram at this index, title-cased, space-joined
    Bigram(usize),
}

/// Thematic grouping shown next to generated titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeCategory {
    LifePurpose,
    Existentialism,
    SelfImprovement,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 3] = [
        ThemeCategory::LifePurpose,
        ThemeCategory::Existentialism,
        ThemeCategory::SelfImprovement,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemeCategory::LifePurpose => "Life Purpose",
            ThemeCategory::Existentialism => "Existentialism",
            ThemeCategory::SelfImprovement => "Self Improvement",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ThemeCategory::LifePurpose => "finding and living with purpose",
            ThemeCategory::Existentialism => "existential themes and life's meaning",
            ThemeCategory::SelfImprovement => "personal growth and transformation",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub category: ThemeCategory,
    pub pieces: &'static [Piece],
}

impl Template {
    /// Highest index this template reads from the given list, if any.
    fn max_slot(&self, kind: SlotKind) -> Option<usize> {
        self.pieces
            .iter()
            .filter_map(|p| match (p, kind) {
                (Piece::Term(i), SlotKind::Term) => Some(*i),
                (Piece::Bigram(i), SlotKind::Bigram) => Some(*i),
                _ => None,
            })
            .max()
    }
}

use Piece::{Bigram as B, Term as T, Text as S};

/// The ten speech-title templates, in output order.
pub const SPEECH_TITLES: &[Template] = &[
    Template {
        category: ThemeCategory::LifePurpose,
        pieces: &[S("The Quest for Meaning: "), T(0), S(" as a Path to Purpose")],
    },
    Template {
        category: ThemeCategory::SelfImprovement,
        pieces: &[S("From "), T(1), S(" to "), T(2), S(": A Journey of Self-Discovery")],
    },
    Template {
        category: ThemeCategory::Existentialism,
        pieces: &[S("Understanding "), T(3), S(": The Key to Personal Growth")],
    },
    Template {
        category: ThemeCategory::SelfImprovement,
        pieces: &[S("The Art of "), B(0), S(": A Philosophical Perspective")],
    },
    Template {
        category: ThemeCategory::LifePurpose,
        pieces: &[S("Beyond "), T(4), S(": Finding Authentic Purpose in Modern Life")],
    },
    Template {
        category: ThemeCategory::SelfImprovement,
        pieces: &[S("The "), B(1), S(" Method: Transforming Self-Understanding")],
    },
    Template {
        category: ThemeCategory::Existentialism,
        pieces: &[S("Existential Wisdom: "), T(0), S(" in the Age of Uncertainty")],
    },
    Template {
        category: ThemeCategory::Existentialism,
        pieces: &[S("The Power of "), T(2), S(": Navigating Life's Big Questions")],
    },
    Template {
        category: ThemeCategory::SelfImprovement,
        pieces: &[B(2), S(": A Blueprint for Personal Excellence")],
    },
    Template {
        category: ThemeCategory::LifePurpose,
        pieces: &[S("Mastering "), T(1), S(": The Path to Authentic Living")],
    },
];

/// Fill the built-in speech-title templates.
pub fn synthesize(
    terms: &[String],
    bigrams: &[Bigram],
) -> Result<Vec<String>, InsufficientDataError> {
    synthesize_with(SPEECH_TITLES, terms, bigrams)
}

/// Fill an arbitrary template set. Output order matches template order.
pub fn synthesize_with(
    templates: &[Template],
    terms: &[String],
    bigrams: &[Bigram],
) -> Result<Vec<String>, InsufficientDataError> {
    check_slots(templates, SlotKind::Term, terms.len())?;
    check_slots(templates, SlotKind::Bigram, bigrams.len())?;

    Ok(templates
        .iter()
        .map(|template| render(template, terms, bigrams))
        .collect())
}

fn check_slots(
    templates: &[Template],
    kind: SlotKind,
    available: usize,
) -> Result<(), InsufficientDataError> {
    let needed = templates.iter().filter_map(|t| t.max_slot(kind)).max();
    match needed {
        Some(slot) if slot >= available => Err(InsufficientDataError {
            kind,
            slot: available,
            available,
        }),
        _ => Ok(()),
    }
}

fn render(template: &Template, terms: &[String], bigrams: &[Bigram]) -> String {
    let mut out = String::new();
    for piece in template.pieces {
        match piece {
            Piece::Text(s) => out.push_str(s),
            Piece::Term(i) => out.push_str(&title_case(&terms[*i])),
            Piece::Bigram(i) => {
                let (a, b) = &bigrams[*i];
                out.push_str(&title_case(a));
                out.push(' ');
                out.push_str(&title_case(b));
            }
        }
    }
    out
}

/// Title-case a string: the first letter of every alphabetic run is
/// uppercased, the rest lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
