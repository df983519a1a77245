// Text generation trait — the swap-ready abstraction over an LLM backend.
//
// The default implementation calls Google Gemini. Anything that can turn a
// prompt into text (another hosted model, a local one, a test stub) can be
// plugged in instead.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for generating free text from a prompt. Async because every real
/// backend is an HTTP call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
