// Colored terminal output for source summaries, titles, and videos.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use super::{group_thousands, truncate_chars};
use crate::generate::prompt::AgeGroup;
use crate::models::{CombinedView, Item, SourceSummary};
use crate::themes::synth::{ThemeCategory, SPEECH_TITLES};
use crate::themes::InsufficientDataError;

/// Words shown per source.
const TOP_WORDS: usize = 10;
/// Phrases shown per source.
const TOP_PHRASES: usize = 5;
/// Items shown in the combined sample before "...and N more".
const SAMPLE_SIZE: usize = 5;

/// "Positive (0.42)" / "Negative (-0.10)". Zero counts as negative.
pub fn sentiment_label(mean: f64) -> String {
    let word = if mean > 0.0 { "Positive" } else { "Negative" };
    format!("{word} ({mean:.2})")
}

fn colorize_sentiment(mean: f64) -> String {
    let label = sentiment_label(mean);
    if mean > 0.0 {
        label.green().to_string()
    } else {
        label.red().to_string()
    }
}

/// Display one source's word list, common phrases, and sentiment.
pub fn display_source_summary(summary: &SourceSummary) {
    println!("\n{}", format!("=== Themes from {} ===", summary.label).bold());

    if summary.is_empty() {
        println!("  {}", "No items retrieved for this source.".yellow());
        return;
    }

    println!("  Items analyzed: {}", summary.items.len());

    let words = summary.unigram_freq.top(TOP_WORDS);
    if !words.is_empty() {
        let rendered: Vec<String> = words
            .iter()
            .map(|(word, n)| format!("{} ({})", word.cyan(), n))
            .collect();
        println!("  Top words: {}", rendered.join(", "));
    }

    let phrases = summary.bigram_freq.top(TOP_PHRASES);
    if !phrases.is_empty() {
        println!("  Common phrases:");
        for ((a, b), n) in &phrases {
            println!("    - '{a} {b}' (mentioned {n} times)");
        }
    }

    println!("  Overall sentiment: {}", colorize_sentiment(summary.mean_sentiment));
}

/// Display synthesized speech titles followed by the category legend.
pub fn display_speech_titles(titles: &[String]) {
    println!("\n{}", "=== Suggested Speech Titles ===".bold());
    println!();
    for (i, title) in titles.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, title);
    }

    println!("\n  {}", "Theme categories:".dimmed());
    for category in ThemeCategory::ALL {
        let numbers: Vec<String> = SPEECH_TITLES
            .iter()
            .enumerate()
            .filter(|(_, t)| t.category == category)
            .map(|(i, _)| (i + 1).to_string())
            .collect();
        println!(
            "    {}: titles {} ({})",
            category.label().bold(),
            numbers.join(", "),
            category.blurb()
        );
    }
}

/// Explain why titles could not be generated.
pub fn display_insufficient_data(err: &InsufficientDataError) {
    println!(
        "\n  {} Cannot suggest speech titles: {}",
        "!".yellow().bold(),
        err
    );
    println!("  Try more subreddits or a longer time window.");
}

/// Display a numbered list of mined videos for one window.
pub fn display_videos(label: &str, items: &[Item]) {
    println!("\n{}", format!("=== {} ({} videos) ===", label, items.len()).bold());

    if items.is_empty() {
        println!("  {}", "No videos found.".yellow());
        return;
    }

    for (i, item) in items.iter().enumerate() {
        println!("\n  {:>2}. {}", i + 1, item.title.bold());
        if let Some(topic) = &item.topic {
            println!("      Context: {}", topic.italic());
        }
        println!(
            "      Views: {} | Channel: {}",
            group_thousands(item.engagement.score),
            item.author.as_deref().unwrap_or("unknown")
        );
        if let Some(url) = &item.url {
            println!("      {}", url.dimmed());
        }
    }
}

/// Summary of a combined multi-window view: count, sample titles, topics.
pub fn display_combined_sample(view: &CombinedView, source_label: &str) {
    let total = view.deduplicated_items.len();
    if total == 0 {
        println!(
            "\n  {} No videos available for {}.",
            "!".yellow().bold(),
            source_label
        );
        return;
    }

    println!("\nFound {total} videos from {source_label}");
    println!("Sample of video titles:");
    for (i, item) in view.deduplicated_items.iter().take(SAMPLE_SIZE).enumerate() {
        let title = truncate_chars(&item.title, 80);
        match &item.topic {
            Some(topic) => println!("  {}. {} - {}", i + 1, title, topic.italic()),
            None => println!("  {}. {}", i + 1, title),
        }
    }
    if total > SAMPLE_SIZE {
        println!("  ...and {} more", total - SAMPLE_SIZE);
    }

    let breakdown = view.topic_breakdown();
    if !breakdown.is_empty() {
        println!("\n  {}", "Topics:".dimmed());
        for (topic, n) in breakdown {
            println!("    {:>3}  {}", n, topic);
        }
    }

    println!(
        "\n  Overall sentiment: {}",
        colorize_sentiment(view.overall_sentiment())
    );
}

/// Display generated lecture themes (or the generation error message).
pub fn display_lecture_themes(age: AgeGroup, text: &str) {
    println!(
        "\n{}",
        format!("=== Lecture Themes for Ages {} ===", age).bold()
    );
    println!();
    println!("{}", text.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_label_signs() {
        assert_eq!(sentiment_label(0.4215), "Positive (0.42)");
        assert_eq!(sentiment_label(-0.1), "Negative (-0.10)");
        assert_eq!(sentiment_label(0.0), "Negative (0.00)");
    }
}
