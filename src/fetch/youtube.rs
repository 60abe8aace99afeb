//! YouTube Data API v3 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use super::{FetchError, ItemPage, PlaylistSource, VideoDuration};
use crate::config::YouTubeConfig;
use crate::models::{PlaylistId, VideoId};

/// HTTP client for the listing, detail and playlist-metadata endpoints.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client from configuration.
    ///
    /// A missing API key is not rejected here; the orchestrator checks it
    /// before the first request of every run.
    pub fn new(config: &YouTubeConfig) -> Result<Self, FetchError> {
        Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("playlist-time/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.usable_api_key().unwrap_or_default().to_string(),
        })
    }

    /// GET an endpoint with the API key attached and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            error!("{} failed with HTTP {}: {}", endpoint, status.as_u16(), message);
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Google API error body: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: Option<PlaylistItemDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemDetails {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    content_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistsResponse {
    #[serde(default)]
    items: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: Option<String>,
}

#[async_trait]
impl PlaylistSource for YouTubeClient {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn list_items(
        &self,
        playlist: &PlaylistId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ItemPage, FetchError> {
        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", "contentDetails"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response: PlaylistItemsResponse = self.get_json("playlistItems", &params).await?;

        Ok(ItemPage {
            video_ids: response
                .items
                .into_iter()
                .filter_map(|item| item.content_details?.video_id)
                .map(VideoId::from)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn video_durations(&self, ids: &[VideoId]) -> Result<Vec<VideoDuration>, FetchError> {
        let joined = ids.iter().map(VideoId::as_str).collect::<Vec<_>>().join(",");
        let response: VideosResponse = self
            .get_json("videos", &[("part", "contentDetails"), ("id", joined.as_str())])
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoDuration {
                video_id: VideoId::from(item.id),
                duration: item.content_details.and_then(|d| d.duration),
            })
            .collect())
    }

    async fn playlist_title(&self, playlist: &PlaylistId) -> Result<Option<String>, FetchError> {
        let response: PlaylistsResponse = self
            .get_json("playlists", &[("part", "snippet"), ("id", playlist.as_str())])
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|p| p.snippet)
            .and_then(|s| s.title))
    }
}
