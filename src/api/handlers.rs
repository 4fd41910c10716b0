use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{PreferenceSpec, RecommendationResult};

use super::AppState;

pub const SERVICE_NAME: &str = "ai-fragrance-microservice";

// Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub model_api: &'static str,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_api = if state.recommendations.is_model_configured() {
        "configured"
    } else {
        "not_configured"
    };

    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { model_api },
    })
}

/// Get AI-powered fragrance recommendations for the submitted preferences
pub async fn fragrance_match(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<PreferenceSpec>, JsonRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Json(spec) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    spec.validate()
        .map_err(|violations| AppError::InvalidInput(violations.join("; ")))?;

    tracing::info!(
        request_id = %request_id,
        intensity = %spec.intensity,
        occasion = %spec.occasion,
        season = %spec.season,
        "Received fragrance match request"
    );

    let start = Instant::now();
    let result = state.recommendations.get_recommendations(&spec).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(result) => {
            tracing::info!(
                request_id = %request_id,
                duration_ms,
                "Fragrance match request completed"
            );
            Ok(Json(result))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                duration_ms,
                error = %e,
                "Fragrance match request failed"
            );
            Err(e.into())
        }
    }
}
