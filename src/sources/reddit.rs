// Reddit client — OAuth token exchange plus subreddit "top" listings.
//
// Uses the password grant when a username and password are configured
// (script apps), otherwise the client-credentials grant (read-only app-only
// access). The bearer token is fetched lazily and reused for the lifetime of
// the client. There is no refresh or retry: a rejected token surfaces as an
// unavailable source for this run.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::traits::{ContentFetcher, FetchError};
use crate::models::{Engagement, Item, TimeWindow};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Reddit's listing endpoints return at most 100 items per request.
const MAX_LISTING_LIMIT: usize = 100;

/// Credentials for a Reddit "script" or app-only OAuth application.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Fetches top posts from subreddits through the OAuth API.
pub struct RedditClient {
    client: Client,
    credentials: RedditCredentials,
    token: Mutex<Option<String>>,
}

impl RedditClient {
    pub fn new(credentials: RedditCredentials, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// Return the cached bearer token, requesting one on first use.
    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let creds = &self.credentials;
        let form: Vec<(&str, &str)> = match (&creds.username, &creds.password) {
            (Some(user), Some(pass)) => vec![
                ("grant_type", "password"),
                ("username", user.as_str()),
                ("password", pass.as_str()),
            ],
            _ => vec![("grant_type", "client_credentials")],
        };

        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&form)
            .send()
            .await
            .context("Failed to reach Reddit token endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Reddit token endpoint returned {status}: {body}");
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse Reddit token response")?;

        // Reddit reports bad credentials as a 200 with an error field
        if let Some(error) = token.error {
            anyhow::bail!("Reddit rejected the credentials: {error}");
        }
        let access_token = token
            .access_token
            .ok_or_else(|| anyhow::anyhow!("Reddit token response had no access_token"))?;

        info!("Authenticated with Reddit");
        *guard = Some(access_token.clone());
        Ok(access_token)
    }
}

#[async_trait]
impl ContentFetcher for RedditClient {
    fn platform(&self) -> &'static str {
        "reddit"
    }

    async fn fetch(
        &self,
        source_id: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Item>, FetchError> {
        let subreddit = source_id.trim_start_matches("r/");
        let token = self
            .access_token()
            .await
            .map_err(|e| FetchError::unavailable(source_id, format!("{e:#}")))?;

        let url = format!("{API_BASE}/r/{subreddit}/top");
        let limit_str = limit.clamp(1, MAX_LISTING_LIMIT).to_string();

        debug!(subreddit, filter = window.reddit_filter(), "Fetching subreddit listing");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("t", window.reddit_filter()),
                ("limit", limit_str.as_str()),
                ("raw_json", "1"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::unavailable(source_id, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::unavailable(
                source_id,
                format!("Reddit returned {status}: check REDDIT_CLIENT_ID/SECRET and account credentials"),
            ));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::empty(source_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::unavailable(
                source_id,
                format!("Reddit returned {status}: {body}"),
            ));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| FetchError::unavailable(source_id, e))?;

        let items: Vec<Item> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into_item())
            .collect();

        if items.is_empty() {
            return Err(FetchError::empty(source_id));
        }

        info!(count = items.len(), subreddit, "Fetched Reddit posts");
        Ok(items)
    }
}

// -- Serde types for the OAuth token endpoint --

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

// -- Serde types for subreddit listings --

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: RedditPost,
}

/// The fields of a Reddit post that the analyzer uses.
#[derive(Debug, Deserialize)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub created_utc: f64,
    pub author: Option<String>,
    pub permalink: Option<String>,
}

impl RedditPost {
    pub fn into_item(self) -> Item {
        let body = if self.selftext.trim().is_empty() {
            None
        } else {
            Some(self.selftext)
        };

        Item {
            id: self.id,
            title: self.title,
            body,
            engagement: Engagement {
                score: self.score,
                comments: self.num_comments,
                likes: 0,
            },
            published_at: DateTime::<Utc>::from_timestamp(self.created_utc as i64, 0),
            author: self.author,
            url: self
                .permalink
                .map(|p| format!("https://www.reddit.com{p}")),
            source_tag: None,
            topic: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_parses_into_items() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t3", "data": {
                        "id": "abc123",
                        "title": "Finding purpose after loss",
                        "selftext": "",
                        "score": 420,
                        "num_comments": 37,
                        "created_utc": 1700000000.0,
                        "author": "someone",
                        "permalink": "/r/Existentialism/comments/abc123/finding_purpose/"
                    }}
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        let items: Vec<Item> = listing
            .data
            .children
            .into_iter()
            .map(|c| c.data.into_item())
            .collect();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, "abc123");
        assert!(item.body.is_none(), "blank selftext should be None");
        assert_eq!(item.engagement.score, 420);
        assert_eq!(item.engagement.comments, 37);
        assert_eq!(
            item.url.as_deref(),
            Some("https://www.reddit.com/r/Existentialism/comments/abc123/finding_purpose/")
        );
        assert!(item.published_at.is_some());
    }
}
