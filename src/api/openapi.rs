use axum::Json;
use utoipa::OpenApi;

use crate::api::errors::{ErrorCode, ErrorDetail, ErrorResponse};
use crate::api::handlers::health::{HealthResponse, ServiceStatus};
use crate::application::dto::{
    BundleRequest, BundleUploadResponse, FileEntryDto, QueryMemoryRequest, QueryMemoryResponse,
    UpsertMemoryRequest, UpsertMemoryResponse,
};

/// OpenAPI document, imported by GPT Actions
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GPT Backend API",
        description = "Bundles file lists into ZIP archives and keeps small per-user memory records"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::zip_bundles::create_bundle_handler,
        crate::api::handlers::zip_bundles::upload_bundle_handler,
        crate::api::handlers::files::download_archive_handler,
        crate::api::handlers::memory::upsert_memory_handler,
        crate::api::handlers::memory::query_memory_handler,
    ),
    components(
        schemas(
            BundleRequest,
            FileEntryDto,
            BundleUploadResponse,
            UpsertMemoryRequest,
            UpsertMemoryResponse,
            QueryMemoryRequest,
            QueryMemoryResponse,
            HealthResponse,
            ServiceStatus,
            ErrorResponse,
            ErrorDetail,
            ErrorCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bundles", description = "ZIP bundle creation and download"),
        (name = "memory", description = "Per-user key/value memory")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/zip-bundles",
            "/zip-bundles/upload",
            "/files/zips/{filename}",
            "/memory/upsert",
            "/memory/query",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
