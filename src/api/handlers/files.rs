use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::application::use_cases::DownloadArchiveUseCase;

/// GET /files/zips/{filename}
/// Download a stored archive with streaming response
#[utoipa::path(
    get,
    path = "/files/zips/{filename}",
    tag = "bundles",
    params(("filename" = String, Path, description = "Stored archive name")),
    responses(
        (status = 200, description = "ZIP archive", content_type = "application/zip", body = Vec<u8>),
        (status = 404, description = "No such archive", body = ErrorResponse)
    )
)]
pub async fn download_archive_handler(
    State(use_case): State<Arc<DownloadArchiveUseCase>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let (reader, size_bytes) = use_case.execute(&filename).await?;

    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_LENGTH, size_bytes.to_string())
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(body)
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}
