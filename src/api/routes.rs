use axum::{
    error_handling::HandleErrorLayer,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Router,
};
use std::any::Any;
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::request_id::{
    make_span_with_request_id, request_id_middleware, REQUEST_ID_HEADER,
};

use super::handlers;
use super::AppState;

/// HTTP-layer settings that wrap the routes
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Creates the main API router with all routes
pub fn create_router(state: AppState, config: &RouterConfig) -> Router {
    let request_timeout = config.request_timeout;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/fragrance/match", post(handlers::fragrance_match))
        .with_state(state)
        .layer(
            // Outermost first: request id is attached before the trace span is created
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    handle_layer_error(err, request_timeout)
                }))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors_layer(&config.cors_origins)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id])
        .allow_credentials(true)
}

fn handle_layer_error(err: BoxError, request_timeout: Duration) -> AppError {
    if err.is::<Elapsed>() {
        AppError::RequestTimeout(request_timeout)
    } else {
        AppError::Internal(err.to_string())
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}
