// Philosophical context — turns an HTML document into prompt-ready text.
//
// Script and style blocks are dropped with their contents, remaining tags are
// stripped, entities decoded, and the text is re-chunked one phrase per line
// (splitting on double spaces) so navigation and markup whitespace collapse.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::output::truncate_chars;

/// Longest context passed to the generator, in characters.
pub const MAX_CONTEXT_CHARS: usize = 10_000;

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").expect("script/style regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag regex"));

/// Extract readable text from an HTML document.
pub fn clean_html(html: &str) -> String {
    let without_code = SCRIPT_STYLE.replace_all(html, " ");
    // Tags become line breaks so block elements don't glue words together
    let text = TAG.replace_all(&without_code, "\n");
    let decoded = html_escape::decode_html_entities(&text);

    decoded
        .lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cap context at [`MAX_CONTEXT_CHARS`], appending "..." when cut.
pub fn limit_context(text: &str) -> String {
    truncate_chars(text, MAX_CONTEXT_CHARS)
}

/// Read and clean a context file. Files ending in .html/.htm are stripped of
/// markup; anything else is used as plain text.
pub fn load_context(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;

    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false);

    Ok(if is_html { clean_html(&raw) } else { raw.trim().to_string() })
}
