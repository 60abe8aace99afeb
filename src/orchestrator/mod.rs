//! Playlist duration orchestrator.
//!
//! Coordinates one calculation run:
//! 1. Check the API key and resolve the playlist ID
//! 2. Fetch the title and the item list concurrently
//! 3. Fetch durations batch by batch
//! 4. Aggregate and apply the playback speed

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::calculate;
use crate::config::YouTubeConfig;
use crate::fetch::{self, FetchError, PlaylistSource};
use crate::models::duration::format_clock;
use crate::models::{PlaylistId, PlaylistResult, UNTITLED_PLAYLIST};

/// Pipeline stage a fetch failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    PlaylistItems,
    VideoDurations,
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("YouTube API key is not configured; set YOUTUBE_API_KEY")]
    Configuration,

    #[error("Invalid YouTube playlist URL")]
    Validation,

    #[error("{stage}: {source}")]
    Fetch {
        stage: FetchStage,
        #[source]
        source: FetchError,
    },

    #[error("No videos found in the playlist or the playlist is private")]
    EmptyPlaylist,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FetchStage::PlaylistItems => {
                "Failed to fetch playlist videos. Please check the playlist URL and try again"
            }
            FetchStage::VideoDurations => "Failed to fetch video durations",
        };
        f.write_str(message)
    }
}

impl RunError {
    /// Upstream HTTP status behind a fetch failure, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RunError::Fetch { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Runs the resolve → list → detail → aggregate pipeline.
pub struct PlaylistOrchestrator {
    config: YouTubeConfig,
    source: Arc<dyn PlaylistSource>,
}

impl PlaylistOrchestrator {
    /// Create an orchestrator. The API key is checked on every run, not here.
    pub fn new(config: YouTubeConfig, source: Arc<dyn PlaylistSource>) -> Self {
        Self { config, source }
    }

    /// Whether a usable API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.usable_api_key().is_some()
    }

    /// Calculate the total watch time of the playlist behind `playlist_url`.
    ///
    /// `speed` is used as given; callers clamp it first. Adjusted fields are
    /// only filled in when `speed` differs from 1.0.
    pub async fn run(&self, playlist_url: &str, speed: f64) -> Result<PlaylistResult, RunError> {
        if !self.is_configured() {
            return Err(RunError::Configuration);
        }

        let playlist = PlaylistId::from_url(playlist_url).ok_or(RunError::Validation)?;
        let started = Instant::now();
        info!("Fetching playlist information for {}", playlist);

        let source = self.source.as_ref();
        let (title, items) = tokio::join!(
            self.fetch_title(&playlist),
            fetch::fetch_all_items(source, &playlist)
        );

        let video_ids = items.map_err(|e| {
            error!("Error fetching playlist videos: {}", e);
            RunError::Fetch {
                stage: FetchStage::PlaylistItems,
                source: e,
            }
        })?;

        if video_ids.is_empty() {
            return Err(RunError::EmptyPlaylist);
        }

        info!(
            "Found {} videos in the playlist: \"{}\"",
            video_ids.len(),
            title
        );

        let records = fetch::fetch_durations(source, &video_ids)
            .await
            .map_err(|e| {
                error!("Error fetching video durations: {}", e);
                RunError::Fetch {
                    stage: FetchStage::VideoDurations,
                    source: e,
                }
            })?;

        let mut duration = calculate::summarize(&records);
        let insights = calculate::insights(&records);

        let playback_speed = if speed != 1.0 {
            let adjusted = calculate::adjust_for_speed(duration.total_seconds, speed);
            duration.adjusted_seconds = Some(adjusted);
            duration.adjusted_formatted = Some(format_clock(adjusted));
            Some(speed)
        } else {
            None
        };

        info!(
            "Playlist {} totals {} over {} videos ({:?})",
            playlist,
            duration.formatted,
            records.len(),
            started.elapsed()
        );

        Ok(PlaylistResult {
            playlist_title: title,
            video_count: records.len(),
            duration,
            playback_speed,
            insights,
        })
    }

    /// Best-effort title lookup; any failure yields the placeholder.
    async fn fetch_title(&self, playlist: &PlaylistId) -> String {
        match self.source.playlist_title(playlist).await {
            Ok(Some(title)) if !title.is_empty() => title,
            Ok(_) => UNTITLED_PLAYLIST.to_string(),
            Err(e) => {
                warn!("Error fetching playlist title: {}", e);
                UNTITLED_PLAYLIST.to_string()
            }
        }
    }
}
