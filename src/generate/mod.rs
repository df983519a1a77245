// Lecture-theme generation — prompt building plus an LLM backend.

pub mod context;
pub mod gemini;
pub mod prompt;
pub mod traits;

use tracing::{info, warn};

use crate::models::CombinedView;
use prompt::{build_lecture_prompt, AgeGroup};
use traits::TextGenerator;

/// Ask the generator for lecture themes. Never fails: any backend error is
/// turned into a message the caller can display as-is.
pub async fn generate_lecture_themes(
    generator: &dyn TextGenerator,
    view: &CombinedView,
    age: AgeGroup,
    philosophy: Option<&str>,
) -> String {
    let capped = philosophy.map(context::limit_context);
    let prompt = build_lecture_prompt(view, age, capped.as_deref());

    info!(
        age_group = %age,
        items = view.deduplicated_items.len(),
        with_context = capped.is_some(),
        "Generating lecture themes"
    );

    match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Lecture theme generation failed");
            format!("Error generating lecture themes: {e:#}")
        }
    }
}
