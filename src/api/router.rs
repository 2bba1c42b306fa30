use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    create_bundle_handler, download_archive_handler, health_handler, not_found_handler,
    query_memory_handler, root_handler, upload_bundle_handler, upsert_memory_handler, HealthState,
};
use crate::api::middleware::{cors, request_log, size_limits};
use crate::api::openapi::openapi_handler;
use crate::application::use_cases::{
    CreateBundleUseCase, DownloadArchiveUseCase, QueryMemoryUseCase, UploadBundleUseCase,
    UpsertMemoryUseCase,
};
use crate::config::Config;

/// Application state container
pub struct AppState {
    pub create_bundle: Arc<CreateBundleUseCase>,
    pub upload_bundle: Arc<UploadBundleUseCase>,
    pub download_archive: Arc<DownloadArchiveUseCase>,
    pub upsert_memory: Arc<UpsertMemoryUseCase>,
    pub query_memory: Arc<QueryMemoryUseCase>,
    pub health: Arc<HealthState>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let body_limit = usize::try_from(max_body_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler).with_state(state.health))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .route(
            "/zip-bundles",
            post(create_bundle_handler).with_state(state.create_bundle),
        )
        .route(
            "/zip-bundles/upload",
            post(upload_bundle_handler).with_state(state.upload_bundle),
        )
        .route(
            "/files/zips/{filename}",
            get(download_archive_handler).with_state(state.download_archive),
        )
        .route(
            "/memory/upsert",
            post(upsert_memory_handler).with_state(state.upsert_memory),
        )
        .route(
            "/memory/query",
            post(query_memory_handler).with_state(state.query_memory),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn_with_state(
            max_body_bytes,
            size_limits::request_size_limit,
        ))
        .layer(cors::create_cors_layer(state.config.cors_origins()))
        .layer(axum_middleware::from_fn(request_log::request_log_middleware))
}
