use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension type for storing request ID in request extensions
#[derive(Clone, Debug, PartialEq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuses the caller's ID when the header holds a valid UUID
    pub fn from_request(request: &Request) -> Self {
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(RequestId)
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request facts available to code that has no access to the request itself,
/// such as error responses
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
}

tokio::task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Context of the request being served on this task, if any
pub fn current_request() -> Option<RequestContext> {
    REQUEST_CONTEXT.try_with(|context| context.clone()).ok()
}

/// Attaches a request ID, echoes it back in the response headers, and writes
/// one access-log event per request once the response is ready.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_request(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    request.extensions_mut().insert(request_id.clone());

    let context = RequestContext {
        request_id: request_id.clone(),
        method: method.clone(),
        path: path.clone(),
    };
    let mut response = REQUEST_CONTEXT.scope(context, next.run(request)).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;
    if status >= 500 {
        tracing::error!(request_id = %request_id, %method, %path, status, duration_ms, "Request served");
    } else if status >= 400 {
        tracing::warn!(request_id = %request_id, %method, %path, status, duration_ms, "Request served");
    } else {
        tracing::info!(request_id = %request_id, %method, %path, status, duration_ms, "Request served");
    }

    response
}

/// Creates the tracing span for a request, tagged with its request ID
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
