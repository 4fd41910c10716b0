use std::sync::Arc;

use crate::services::RecommendationService;

/// Shared application state
///
/// Holds no per-request data; the recommendation service is stateless.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(recommendations: RecommendationService) -> Self {
        Self {
            recommendations: Arc::new(recommendations),
        }
    }
}
