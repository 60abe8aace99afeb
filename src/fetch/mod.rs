//! Upstream playlist fetching.
//!
//! The [`PlaylistSource`] trait covers the three upstream endpoints the
//! pipeline needs (item listing, video details, playlist metadata).
//! [`fetch_all_items`] and [`fetch_durations`] drive pagination and batching
//! on top of any source. No retries and no partial results: the first failed
//! request aborts the whole fetch.

mod youtube;

#[cfg(test)]
pub mod mock;

pub use youtube::YouTubeClient;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::duration;
use crate::models::{DurationRecord, PlaylistId, VideoId};

/// Items requested per listing page.
pub const PAGE_SIZE: u32 = 50;

/// Maximum ids the detail endpoint accepts per request.
pub const BATCH_SIZE: usize = 50;

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status reported by the upstream, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            FetchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// One page of the playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPage {
    pub video_ids: Vec<VideoId>,
    pub next_page_token: Option<String>,
}

/// Raw duration for one video as reported by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDuration {
    pub video_id: VideoId,
    /// ISO-8601 duration; `None` when the video has no duration data.
    pub duration: Option<String>,
}

/// Trait for upstream playlist APIs.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch one page of playlist items.
    async fn list_items(
        &self,
        playlist: &PlaylistId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ItemPage, FetchError>;

    /// Fetch durations for up to [`BATCH_SIZE`] videos.
    async fn video_durations(&self, ids: &[VideoId]) -> Result<Vec<VideoDuration>, FetchError>;

    /// Fetch the playlist's display title.
    async fn playlist_title(&self, playlist: &PlaylistId) -> Result<Option<String>, FetchError>;
}

/// Collect every video id in a playlist, following continuation tokens.
pub async fn fetch_all_items(
    source: &dyn PlaylistSource,
    playlist: &PlaylistId,
) -> Result<Vec<VideoId>, FetchError> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = source
            .list_items(playlist, PAGE_SIZE, page_token.as_deref())
            .await?;
        pages += 1;
        debug!(
            "Page {} of {} returned {} items",
            pages,
            playlist,
            page.video_ids.len()
        );
        video_ids.extend(page.video_ids);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    info!(
        "Listed {} items from {} across {} page(s) via {}",
        video_ids.len(),
        playlist,
        pages,
        source.name()
    );
    Ok(video_ids)
}

/// Fetch and decode durations in sequential batches of [`BATCH_SIZE`].
///
/// Videos without duration data are left out of the result.
pub async fn fetch_durations(
    source: &dyn PlaylistSource,
    video_ids: &[VideoId],
) -> Result<Vec<DurationRecord>, FetchError> {
    let mut records = Vec::with_capacity(video_ids.len());

    for (i, batch) in video_ids.chunks(BATCH_SIZE).enumerate() {
        debug!("Fetching durations for batch {} ({} ids)", i + 1, batch.len());
        let details = source.video_durations(batch).await?;

        for detail in details {
            let Some(encoded) = detail.duration else {
                debug!("Skipping {}: no duration data", detail.video_id);
                continue;
            };
            records.push(DurationRecord {
                video_id: detail.video_id,
                duration_seconds: duration::decode(&encoded),
            });
        }
    }

    Ok(records)
}
