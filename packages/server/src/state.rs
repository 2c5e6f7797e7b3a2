use std::sync::Arc;

use crate::config::AppConfig;
use crate::orchestrator::InterviewOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<InterviewOrchestrator>,
    pub config: AppConfig,
}
