// Google Gemini implementation of TextGenerator.
//
// Single `generateContent` call per prompt, no streaming and no retries.
// API docs: https://ai.google.dev/api/generate-content

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TextGenerator;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Calling Gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        extract_text(result)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .context("Gemini returned no candidates (prompt may have been blocked)")?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        anyhow::bail!("Gemini returned an empty response (finish reason: {reason})");
    }
    Ok(text)
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_is_kept() {
        let client = GeminiClient::new("key".to_string(), DEFAULT_MODEL);
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let json = r#"{"candidates": [
            {"content": {"parts": [{"text": "1. **Title**"}, {"text": " more"}]}, "finishReason": "STOP"},
            {"content": {"parts": [{"text": "ignored"}]}}
        ]}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(resp).unwrap(), "1. **Title** more");
    }

    #[test]
    fn no_candidates_is_an_error() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(resp).is_err());
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(resp).unwrap_err().to_string();
        assert!(err.contains("SAFETY"), "got: {err}");
    }
}
