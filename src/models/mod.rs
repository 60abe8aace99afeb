//! Core data models for the playlist calculator.

pub mod duration;
mod ids;
mod playlist;

pub use duration::DurationBreakdown;
pub use ids::*;
pub use playlist::*;
