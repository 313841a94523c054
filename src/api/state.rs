use std::sync::Arc;

use crate::services::analysis::AnalysisService;

#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    /// Base URL advertised in the mini-app manifest. Falls back to the
    /// request's `Host` header when unset.
    pub public_url: Option<String>,
}

impl AppState {
    pub fn new(analysis: Arc<AnalysisService>, public_url: Option<String>) -> Self {
        Self { analysis, public_url }
    }
}
