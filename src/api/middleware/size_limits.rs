use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::errors::ApiError;

/// Parse Content-Length header value
fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-length")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Reject bodies whose declared Content-Length exceeds the limit before they
/// are read.
///
/// Chunked bodies carry no length; `DefaultBodyLimit` on the router stops
/// those while they are read and the JSON rejection turns into the same 413.
pub async fn request_size_limit(
    State(max_bytes): State<u64>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(length) = parse_content_length(request.headers()) {
        if length > max_bytes {
            tracing::warn!(length, max_bytes, "request body too large");
            return ApiError::payload_too_large(format!(
                "Request body too large: {} bytes (max: {} bytes)",
                length, max_bytes
            ))
            .into_response();
        }
    }

    next.run(request).await
}
