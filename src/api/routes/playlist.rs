use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::clamp_speed;
use crate::models::{DurationBreakdown, Insights, PlaylistId, PlaylistResult};
use crate::orchestrator::RunError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTimeParams {
    /// Raw playlist ID or full playlist URL
    pub playlist_id: Option<String>,
    pub speed: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTimeResponse {
    pub playlist_title: String,
    pub video_count: usize,
    pub total_duration: String,
    pub total_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_seconds: Option<u64>,
    pub playback_speed: f64,
    pub details: DurationBreakdown,
    pub insights: Insights,
}

impl From<PlaylistResult> for PlaylistTimeResponse {
    fn from(result: PlaylistResult) -> Self {
        Self {
            playlist_title: result.playlist_title,
            video_count: result.video_count,
            total_duration: result.duration.formatted,
            total_seconds: result.duration.total_seconds,
            adjusted_duration: result.duration.adjusted_formatted,
            adjusted_seconds: result.duration.adjusted_seconds,
            playback_speed: result.playback_speed.unwrap_or(1.0),
            details: result.duration.detailed,
            insights: result.insights,
        }
    }
}

/// Parse the `speed` query value; unparseable or absent means 1.0.
fn parse_speed(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .map(clamp_speed)
        .unwrap_or(1.0)
}

/// `GET /api/playlist-time?playlistId=...&speed=...`
pub async fn playlist_time(
    State(state): State<AppState>,
    Query(params): Query<PlaylistTimeParams>,
) -> Result<Json<PlaylistTimeResponse>, ApiError> {
    if !state.orchestrator.is_configured() {
        return Err(RunError::Configuration.into());
    }

    let playlist = params
        .playlist_id
        .as_deref()
        .and_then(PlaylistId::from_input)
        .ok_or_else(|| {
            ApiError::BadRequest("Missing or invalid playlistId query parameter.".to_string())
        })?;

    let speed = parse_speed(params.speed.as_deref());

    let result = state.orchestrator.run(&playlist.to_url(), speed).await?;

    Ok(Json(result.into()))
}
