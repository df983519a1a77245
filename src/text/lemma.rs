// Rule-based English lemmatizer.
//
// Reduces inflected forms to a dictionary base form without part-of-speech
// tagging: an irregular-form table first, then plural and -ing/-ed
// detachment. Each detachment rule is guarded so common nouns that merely
// look inflected ("meaning", "consciousness", "status") pass through intact.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // nouns
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("mice", "mouse"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("selves", "self"),
        ("leaves", "leaf"),
        ("thieves", "thief"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("hypotheses", "hypothesis"),
        ("phenomena", "phenomenon"),
        ("criteria", "criterion"),
        // verbs
        ("found", "find"),
        ("thought", "think"),
        ("felt", "feel"),
        ("knew", "know"),
        ("known", "know"),
        ("gave", "give"),
        ("given", "give"),
        ("took", "take"),
        ("taken", "take"),
        ("made", "make"),
        ("began", "begin"),
        ("begun", "begin"),
        ("became", "become"),
        ("brought", "bring"),
        ("bought", "buy"),
        ("taught", "teach"),
        ("sought", "seek"),
        ("told", "tell"),
        ("said", "say"),
        ("lost", "lose"),
        ("held", "hold"),
        ("stood", "stand"),
        ("understood", "understand"),
        ("spoke", "speak"),
        ("spoken", "speak"),
        ("wrote", "write"),
        ("written", "write"),
        ("chose", "choose"),
        ("chosen", "choose"),
        ("grew", "grow"),
        ("grown", "grow"),
        ("drew", "draw"),
        ("drawn", "draw"),
        ("ran", "run"),
        ("met", "meet"),
        ("sat", "sit"),
        ("led", "lead"),
        ("saw", "see"),
        ("seen", "see"),
        ("went", "go"),
        ("gone", "go"),
        ("died", "die"),
        ("dying", "die"),
        ("lying", "lie"),
    ]
    .into_iter()
    .collect()
});

/// Words that end like an inflection but are already base forms.
static KEEP: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // -ing nouns
        "thing", "nothing", "something", "everything", "anything", "king", "ring", "spring",
        "string", "wing", "sing", "sting", "swing", "bring", "morning", "evening", "ceiling",
        "wedding", "meaning", "being", "wellbeing", "awakening", "understanding", "blessing",
        "suffering", "teaching", "building", "painting", "writing", "feeling", "healing",
        "wellspring", "offspring",
        // -ed words that are not past tenses
        "sacred", "hundred", "kindred", "naked", "wicked", "bed", "red", "shed", "fed", "wed",
        "bred", "sled", "led", "need", "seed", "feed", "speed", "deed", "creed", "greed",
        "indeed", "breed",
        // -s words that are not plurals
        "news", "christmas", "series", "species", "lens", "bus", "gas", "yes", "this", "thus",
        "always", "perhaps", "whereas", "atlas", "canvas", "chaos", "cosmos", "ethos", "pathos",
        "logos", "mythos", "kudos", "bias", "alias", "diabetes", "herpes",
    ]
    .into_iter()
    .collect()
});

/// Reduce a lowercase token to its base form.
///
/// Tokens shorter than four characters are returned unchanged; they are
/// almost never inflected forms worth reducing.
pub fn lemmatize(token: &str) -> String {
    if let Some(base) = IRREGULAR.get(token) {
        return (*base).to_string();
    }
    if token.chars().count() < 4 || KEEP.contains(token) {
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ing") {
        if let Some(base) = detach_verb_suffix(stem) {
            return base;
        }
        return token.to_string();
    }

    if let Some(stem) = token.strip_suffix("ed") {
        // "agreed", "freed": stripping would leave a dangling "e"
        if stem.ends_with('e') {
            return token.to_string();
        }
        if let Some(base) = detach_verb_suffix(stem) {
            return base;
        }
        return token.to_string();
    }

    if token.ends_with('s') {
        return singularize(token);
    }

    token.to_string()
}

/// Turn a stem left over from -ing/-ed removal into a base verb, or None
/// when the stem is too short or has no vowel (so it wasn't a suffix).
fn detach_verb_suffix(stem: &str) -> Option<String> {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 3 || !chars.iter().any(|&c| is_vowel(c)) {
        return None;
    }

    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];

    // "running" -> "run", but "falling" -> "fall", "kissing" -> "kiss"
    if last == prev && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return Some(chars[..n - 1].iter().collect());
    }

    // Porter step 1b restorations: "creat" -> "create", "troubl" -> "trouble"
    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        return Some(format!("{stem}e"));
    }

    // "living" -> "live", "dancing" -> "dance", "continuing" -> "continue",
    // "inspired" -> "inspire"
    if matches!(last, 'v' | 'c' | 'u') || stem.ends_with("ir") || stem.ends_with("ur") {
        return Some(format!("{stem}e"));
    }

    // Single-syllable consonant-vowel-consonant: "making" -> "make", "hoping" -> "hope"
    if n >= 3
        && vowel_groups(&chars) == 1
        && !is_vowel(last)
        && !matches!(last, 'w' | 'x' | 'y')
        && is_vowel(prev)
        && !is_vowel(chars[n - 3])
    {
        return Some(format!("{stem}e"));
    }

    Some(stem.to_string())
}

fn singularize(token: &str) -> String {
    if token.ends_with("ss")
        || token.ends_with("us")
        || token.ends_with("is")
        || token.ends_with("ics")
    {
        return token.to_string();
    }
    if let Some(stem) = token.strip_suffix("ies") {
        // "lies", "ties", "dies" only drop the s
        if stem.chars().count() < 2 {
            return token[..token.len() - 1].to_string();
        }
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if token.ends_with(suffix) {
            return token[..token.len() - 2].to_string();
        }
    }
    if let Some(stem) = token.strip_suffix("oes") {
        return format!("{stem}o");
    }
    token[..token.len() - 1].to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn vowel_groups(chars: &[char]) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for &c in chars {
        let v = is_vowel(c);
        if v && !in_group {
            groups += 1;
        }
        in_group = v;
    }
    groups
}
