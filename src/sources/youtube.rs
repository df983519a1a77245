// YouTube Data API v3 client — most-viewed videos for a query.
//
// Two calls per fetch: `search.list` ordered by view count within the window
// to get video ids, then `videos.list` for snippets and statistics. Results
// are re-sorted by view count since `videos.list` doesn't preserve order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use super::traits::{ContentFetcher, FetchError};
use crate::models::{sort_by_engagement, Engagement, Item, TimeWindow};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// `search.list` accepts at most 50 results per page.
const MAX_SEARCH_RESULTS: usize = 50;

/// Fetches popular videos through the YouTube Data API.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE)
    }

    /// Point the client at a different API host.
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        source_id: &str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::unavailable(source_id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = if status == StatusCode::FORBIDDEN || status == StatusCode::BAD_REQUEST {
                format!("YouTube {endpoint} returned {status} (check YOUTUBE_API_KEY and quota): {body}")
            } else {
                format!("YouTube {endpoint} returned {status}: {body}")
            };
            return Err(FetchError::unavailable(source_id, reason));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::unavailable(source_id, e))
    }
}

#[async_trait]
impl ContentFetcher for YouTubeClient {
    fn platform(&self) -> &'static str {
        "youtube"
    }

    async fn fetch(
        &self,
        source_id: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Item>, FetchError> {
        let published_after = window
            .published_after(Utc::now())
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = limit.clamp(1, MAX_SEARCH_RESULTS).to_string();

        debug!(query = source_id, %published_after, "Searching YouTube");

        let search: SearchResponse = self
            .get(
                source_id,
                "search",
                &[
                    ("part", "id,snippet"),
                    ("q", source_id),
                    ("type", "video"),
                    ("order", "viewCount"),
                    ("publishedAfter", published_after.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        if ids.is_empty() {
            return Err(FetchError::empty(source_id));
        }

        let joined = ids.join(",");
        let videos: VideosResponse = self
            .get(
                source_id,
                "videos",
                &[("part", "snippet,statistics"), ("id", joined.as_str())],
            )
            .await?;

        let mut items: Vec<Item> = videos.items.into_iter().map(Video::into_item).collect();
        if items.is_empty() {
            return Err(FetchError::empty(source_id));
        }
        sort_by_engagement(&mut items);

        info!(count = items.len(), query = source_id, window = %window, "Fetched YouTube videos");
        Ok(items)
    }
}

// -- Serde types for search.list --

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    video_id: Option<String>,
}

// -- Serde types for videos.list --

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Deserialize)]
struct Video {
    id: String,
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    channel_title: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

/// The API reports counts as decimal strings.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

fn parse_count(value: Option<&str>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

impl Video {
    fn into_item(self) -> Item {
        let body = if self.snippet.description.trim().is_empty() {
            None
        } else {
            Some(self.snippet.description)
        };

        Item {
            url: Some(format!("https://www.youtube.com/watch?v={}", self.id)),
            id: self.id,
            title: self.snippet.title,
            body,
            engagement: Engagement {
                score: parse_count(self.statistics.view_count.as_deref()),
                comments: parse_count(self.statistics.comment_count.as_deref()),
                likes: parse_count(self.statistics.like_count.as_deref()),
            },
            published_at: self.snippet.published_at,
            author: self.snippet.channel_title,
            source_tag: None,
            topic: None,
        }
    }
}
