//! # Playlist Time
//!
//! Total watch-time of a public YouTube playlist, optionally adjusted for
//! playback speed.
//!
//! ## Architecture
//!
//! - **models**: Duration codec, identifiers and result types
//! - **fetch**: YouTube Data API client, pagination and batching
//! - **calculate**: Totals, insights and speed adjustment
//! - **orchestrator**: One calculation run, end to end
//! - **api**: REST API endpoints and static frontend
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod orchestrator;

pub use models::*;
pub use orchestrator::{PlaylistOrchestrator, RunError};
