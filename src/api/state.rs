use std::sync::Arc;

use crate::orchestrator::PlaylistOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<PlaylistOrchestrator>,
}
