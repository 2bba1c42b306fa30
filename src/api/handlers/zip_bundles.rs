use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::api::middleware::request_log::BundleLogContext;
use crate::application::dto::{BundleRequest, BundleUploadResponse};
use crate::application::use_cases::{CreateBundleUseCase, UploadBundleUseCase};

/// POST /zip-bundles
/// Build a ZIP from the listed files and stream it back
#[utoipa::path(
    post,
    path = "/zip-bundles",
    tag = "bundles",
    request_body = BundleRequest,
    responses(
        (status = 200, description = "ZIP archive", content_type = "application/zip", body = Vec<u8>),
        (status = 400, description = "Invalid bundle or failed download", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn create_bundle_handler(
    State(use_case): State<Arc<CreateBundleUseCase>>,
    payload: Result<Json<BundleRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    // Resolution happens here; after this point the status line is committed
    let bundle = use_case.stream(request).await?;
    let filename = bundle.project_name.archive_filename();
    info!(filename = %filename, file_count = bundle.file_count, "streaming bundle");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .extension(BundleLogContext {
            archive_name: filename,
            file_count: bundle.file_count,
        })
        .body(Body::from_stream(bundle.body))
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}

/// POST /zip-bundles/upload
/// Build a ZIP in memory, store it and return its download URL
#[utoipa::path(
    post,
    path = "/zip-bundles/upload",
    tag = "bundles",
    request_body = BundleRequest,
    responses(
        (status = 201, description = "Archive stored", body = BundleUploadResponse),
        (status = 400, description = "Invalid bundle or failed download", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn upload_bundle_handler(
    State(use_case): State<Arc<UploadBundleUseCase>>,
    payload: Result<Json<BundleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let response = use_case.execute(request).await?;
    let context = BundleLogContext {
        archive_name: response.path.clone(),
        file_count: response.file_count,
    };
    Ok((StatusCode::CREATED, Extension(context), Json(response)))
}
