use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::generate::gemini::DEFAULT_MODEL;
use crate::sources::reddit::RedditCredentials;

const DEFAULT_USER_AGENT: &str = "rust:themetracker:v0.1.0";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    /// Username + password enable the password grant; without them the
    /// client falls back to app-only (client credentials) access.
    pub reddit_username: Option<String>,
    pub reddit_password: Option<String>,
    /// Reddit rejects generic user agents, so this should name the app and owner
    pub reddit_user_agent: String,
    pub youtube_api_key: String,
    /// Google AI Studio key used for Gemini
    pub google_api_key: String,
    pub gemini_model: String,
    /// Optional JSON file replacing the built-in classification rules
    pub rules_path: Option<PathBuf>,
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time. Each command checks the keys it
    /// needs with the `require_*` methods before making network calls.
    pub fn load() -> Result<Self> {
        Ok(Self {
            reddit_client_id: env::var("REDDIT_CLIENT_ID").unwrap_or_default(),
            reddit_client_secret: env::var("REDDIT_CLIENT_SECRET").unwrap_or_default(),
            reddit_username: non_empty("REDDIT_USERNAME"),
            reddit_password: non_empty("REDDIT_PASSWORD"),
            reddit_user_agent: non_empty("REDDIT_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            youtube_api_key: env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            rules_path: non_empty("THEMETRACKER_RULES").map(PathBuf::from),
        })
    }

    /// Check that Reddit app credentials are configured.
    pub fn require_reddit(&self) -> Result<()> {
        if self.reddit_client_id.is_empty() || self.reddit_client_secret.is_empty() {
            anyhow::bail!(
                "REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must be set. Add them to your .env file.\n\
                 Create an app at https://www.reddit.com/prefs/apps to get them."
            );
        }
        Ok(())
    }

    /// Check that the YouTube Data API key is configured.
    pub fn require_youtube(&self) -> Result<()> {
        if self.youtube_api_key.is_empty() {
            anyhow::bail!(
                "YOUTUBE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the Gemini key is configured.
    pub fn require_gemini(&self) -> Result<()> {
        if self.google_api_key.is_empty() {
            anyhow::bail!(
                "GOOGLE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    pub fn reddit_credentials(&self) -> RedditCredentials {
        RedditCredentials {
            client_id: self.reddit_client_id.clone(),
            client_secret: self.reddit_client_secret.clone(),
            username: self.reddit_username.clone(),
            password: self.reddit_password.clone(),
        }
    }
}
