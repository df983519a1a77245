// Lecture prompt construction.
//
// Two variants: a plain one built from trending titles and recurring terms,
// and a context-aware one that also embeds the school's philosophical
// context and asks the model to align with it.

use std::fmt;
use std::str::FromStr;

use crate::models::CombinedView;

/// Target audience for generated lecture themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtyPlus,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Twenties,
        AgeGroup::Thirties,
        AgeGroup::Forties,
        AgeGroup::Fifties,
        AgeGroup::SixtyPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Twenties => "20-30",
            AgeGroup::Thirties => "30-40",
            AgeGroup::Forties => "40-50",
            AgeGroup::Fifties => "50-60",
            AgeGroup::SixtyPlus => "60+",
        }
    }

    /// Typical concerns of the group, quoted verbatim into the prompt.
    pub fn characteristics(self) -> &'static str {
        match self {
            AgeGroup::Twenties => "digital natives, social media focused, seeking authenticity, concerned about climate crisis, mental health aware",
            AgeGroup::Thirties => "career-focused, starting families, balancing work-life, health conscious, pragmatic spirituality",
            AgeGroup::Forties => "mid-life reflection, established careers, parenting teens, seeking deeper meaning, stress management",
            AgeGroup::Fifties => "empty nest transitions, career peak or change, caring for aging parents, legacy considerations",
            AgeGroup::SixtyPlus => "retirement planning/living, health challenges, grandparenting, mortality awareness, wisdom sharing",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['–', ' '], "-");
        match normalized.as_str() {
            "20-30" | "20s" => Ok(AgeGroup::Twenties),
            "30-40" | "30s" => Ok(AgeGroup::Thirties),
            "40-50" | "40s" => Ok(AgeGroup::Forties),
            "50-60" | "50s" => Ok(AgeGroup::Fifties),
            "60+" | "60" | "60s" => Ok(AgeGroup::SixtyPlus),
            other => anyhow::bail!(
                "Unknown age group '{other}'. Expected one of: 20-30, 30-40, 40-50, 50-60, 60+"
            ),
        }
    }
}

/// One "- Title (topic)" line per item, in the view's order.
fn titles_block(view: &CombinedView) -> String {
    view.deduplicated_items
        .iter()
        .map(|item| match item.topic.as_deref() {
            Some(topic) => format!("- {} ({})", item.title, topic),
            None => format!("- {}", item.title),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn recurring_block(view: &CombinedView) -> Option<String> {
    if view.merged_top_terms.is_empty() && view.merged_top_bigrams.is_empty() {
        return None;
    }

    let mut block = String::from("Recurring terms across these titles and descriptions:");
    if !view.merged_top_terms.is_empty() {
        block.push_str(&format!("\nWords: {}", view.merged_top_terms.join(", ")));
    }
    if !view.merged_top_bigrams.is_empty() {
        let phrases: Vec<String> = view
            .merged_top_bigrams
            .iter()
            .map(|(a, b)| format!("{a} {b}"))
            .collect();
        block.push_str(&format!("\nPhrases: {}", phrases.join(", ")));
    }
    Some(block)
}

/// Build the lecture-theme prompt. A non-empty `philosophy` selects the
/// context-aware variant; callers are expected to have capped its length.
pub fn build_lecture_prompt(
    view: &CombinedView,
    age: AgeGroup,
    philosophy: Option<&str>,
) -> String {
    let titles = titles_block(view);
    let recurring = recurring_block(view)
        .map(|b| format!("\n{b}\n"))
        .unwrap_or_default();
    let group = age.label();
    let traits = age.characteristics();

    match philosophy.map(str::trim).filter(|p| !p.is_empty()) {
        Some(context) => format!(
            "As a spiritual content creator for a philosophical school of thought, analyze these trending YouTube video titles related to spirituality:

{titles}
{recurring}
The philosophical school has the following context, which should guide your suggestions:
----
{context}
----

Based on these trends and the philosophical context, suggest 5 compelling lecture themes that would resonate specifically with people aged {group} years.
Consider that this age group typically has these characteristics: {traits}.

Make sure your suggested themes align with the philosophical approach described in the context.

For each theme:
1. Provide a catchy title that reflects both current trends and the philosophical approach
2. Write a short description (2-3 sentences)
3. Explain why this theme would resonate with this specific age group
4. Briefly note how it connects to the philosophical context

Format your response as a numbered list with the title in bold, followed by the description and reasoning.
"
        ),
        None => format!(
            "As a spiritual content creator, analyze these trending YouTube video titles related to spirituality:

{titles}
{recurring}
Based on these trends, suggest 5 compelling lecture themes that would resonate specifically with people aged {group} years.
Consider that this age group typically has these characteristics: {traits}.

For each theme:
1. Provide a catchy title
2. Write a short description (2-3 sentences)
3. Explain why this theme would resonate with this specific age group

Format your response as a numbered list with the title in bold, followed by the description and reasoning.
"
        ),
    }
}
