use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::api::errors::ErrorCode;

const REQUEST_ID: &str = "x-request-id";

/// What a bundle handler produced, picked up by the request log
#[derive(Debug, Clone)]
pub struct BundleLogContext {
    pub archive_name: String,
    pub file_count: usize,
}

/// Client supplied request id, or a fresh one
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Logs one line per request with the matched route, the error code of a
/// failed request, and the bundle summary of a bundle request.
///
/// For streamed archives the duration covers time to headers, not the body.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "<unmatched>".to_string());
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers());

    let span = tracing::info_span!("request", request_id = %request_id, route = %route);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
    }

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;
    let error_code = response.extensions().get::<ErrorCode>().map(ErrorCode::as_str);
    let bundle = response.extensions().get::<BundleLogContext>();
    let archive_name = bundle.map(|b| b.archive_name.as_str());
    let file_count = bundle.map(|b| b.file_count);

    if response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            %method,
            %route,
            %path,
            status,
            duration_ms,
            error_code,
            "request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            %method,
            %route,
            %path,
            status,
            duration_ms,
            error_code,
            archive_name,
            file_count,
            "request completed"
        );
    }

    response
}
