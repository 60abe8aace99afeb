//! Per-run playlist duration results.

use serde::{Deserialize, Serialize};

use super::duration::DurationBreakdown;
use super::ids::VideoId;

/// Title used when the playlist metadata lookup fails or has no title.
pub const UNTITLED_PLAYLIST: &str = "Untitled Playlist";

/// A video paired with its decoded duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRecord {
    pub video_id: VideoId,
    pub duration_seconds: u64,
}

impl DurationRecord {
    pub fn new(video_id: impl Into<VideoId>, duration_seconds: u64) -> Self {
        Self {
            video_id: video_id.into(),
            duration_seconds,
        }
    }
}

/// Aggregate watch-time for a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationSummary {
    pub total_seconds: u64,

    /// `HH:MM:SS`
    pub formatted: String,

    pub detailed: DurationBreakdown,

    /// Only set when a playback speed other than 1.0 was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_formatted: Option<String>,
}

/// Descriptive statistics over the non-zero durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub average_seconds: u64,
    pub longest_seconds: u64,
    pub shortest_seconds: u64,
}

/// Everything one orchestrator run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResult {
    pub playlist_title: String,

    /// Number of videos that reported a duration.
    pub video_count: usize,

    pub duration: DurationSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_speed: Option<f64>,

    pub insights: Insights,
}
