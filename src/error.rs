use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::middleware::request_id::current_request;

/// Failure of a single upstream model call
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream call timed out")]
    Timeout,

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("undecodable upstream response: {0}")]
    Decode(String),

    #[error("no content in upstream response")]
    EmptyContent,
}

impl UpstreamError {
    /// Every single-attempt failure is worth another attempt; the bound lives in the invoker.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Transport(_)
            | UpstreamError::Timeout
            | UpstreamError::Status { .. }
            | UpstreamError::Decode(_)
            | UpstreamError::EmptyContent => true,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// All attempts against the upstream model failed
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("upstream model failed after {attempts} attempts: {last}")]
pub struct UpstreamExhaustedError {
    pub attempts: u32,
    #[source]
    pub last: UpstreamError,
}

/// The only error a recommendation request surfaces to its caller
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Failed to generate fragrance recommendations. Please try again later.")]
pub struct RecommendationUnavailableError {
    #[source]
    pub cause: UpstreamExhaustedError,
}

impl From<UpstreamExhaustedError> for RecommendationUnavailableError {
    fn from(cause: UpstreamExhaustedError) -> Self {
        Self { cause }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    RecommendationUnavailable(#[from] RecommendationUnavailableError),

    #[error("Request timed out after {0:?}")]
    RequestTimeout(std::time::Duration),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::RecommendationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RequestTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::RecommendationUnavailable(err) => err.to_string(),
            AppError::RequestTimeout(_) => {
                "Fragrance recommendations took too long. Please try again later.".to_string()
            }
            // Internal details stay in the logs
            AppError::Internal(_) => "Internal server error".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        // Outside a request scope (e.g. unit tests) path and method are null
        let request = current_request();
        let body = Json(json!({
            "statusCode": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339(),
            "path": request.as_ref().map(|r| r.path.clone()),
            "method": request.as_ref().map(|r| r.method.to_string()),
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
