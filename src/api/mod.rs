//! REST API endpoints.
//!
//! Axum-based HTTP API serving playlist watch-time calculations, plus the
//! static browser frontend.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::orchestrator::RunError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RunError> for ApiError {
    fn from(err: RunError) -> Self {
        let message = err.to_string();
        match err {
            RunError::Configuration => ApiError::Internal(message),
            RunError::Validation => ApiError::BadRequest(message),
            RunError::EmptyPlaylist => ApiError::NotFound(message),
            RunError::Fetch { .. } => match err
                .upstream_status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
            {
                Some(status) => ApiError::Upstream { status, message },
                None => ApiError::Internal(message),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Build the CORS layer for a configured origin (`*` allows any).
fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new().allow_methods([Method::GET]);
    if origin == "*" {
        return base.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => base.allow_origin(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin: {}", origin);
            base
        }
    }
}

/// Assemble the application router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/playlist-time", get(routes::playlist::playlist_time))
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(cors_layer(&server.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YouTubeConfig;
    use crate::fetch::mock::MockPlaylistSource;
    use crate::fetch::FetchError;
    use crate::orchestrator::{FetchStage, PlaylistOrchestrator};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            orchestrator: Arc::new(PlaylistOrchestrator::new(
                YouTubeConfig::default(),
                Arc::new(MockPlaylistSource::new()),
            )),
        }
    }

    fn fetch_error(status: u16) -> RunError {
        RunError::Fetch {
            stage: FetchStage::PlaylistItems,
            source: FetchError::Upstream {
                status,
                message: "boom".to_string(),
            },
        }
    }

    #[test]
    fn test_run_error_mapping() {
        assert!(matches!(
            ApiError::from(RunError::Configuration),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(RunError::Validation),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(RunError::EmptyPlaylist),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_fetch_error_passes_upstream_status_through() {
        match ApiError::from(fetch_error(403)) {
            ApiError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(message.contains("boom"));
            }
            other => panic!("expected upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_without_error_status_is_internal() {
        assert!(matches!(
            ApiError::from(fetch_error(302)),
            ApiError::Internal(_)
        ));

        let transport = RunError::Fetch {
            stage: FetchStage::VideoDurations,
            source: FetchError::InvalidUrl("x".to_string()),
        };
        assert!(matches!(ApiError::from(transport), ApiError::Internal(_)));
    }

    #[test]
    fn test_error_response_status() {
        let resp = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Upstream {
            status: StatusCode::NOT_FOUND,
            message: "gone".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(), &ServerConfig::default());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_serves_static_frontend() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Playlist Time</h1>").unwrap();
        let server = ServerConfig {
            static_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let app = build_router(test_state(), &server);
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Playlist Time"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let server = ServerConfig {
            static_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let app = build_router(test_state(), &server);
        let resp = app
            .oneshot(Request::builder().uri("/nope.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
