use axum::{http::Method, http::Uri, Json};
use serde_json::{json, Value};

use crate::api::errors::ApiError;

/// GET /
/// Service name, version and the routes it serves
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "gpt-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "zipBundles": "POST /zip-bundles",
            "zipBundlesUpload": "POST /zip-bundles/upload",
            "files": "GET /files/zips/{filename}",
            "memoryUpsert": "POST /memory/upsert",
            "memoryQuery": "POST /memory/query",
            "openapi": "GET /api-docs/openapi.json"
        }
    }))
}

/// Fallback for unknown routes
pub async fn not_found_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} {} not found", method, uri.path()))
}
