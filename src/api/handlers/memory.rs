use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::application::dto::{
    QueryMemoryRequest, QueryMemoryResponse, UpsertMemoryRequest, UpsertMemoryResponse,
};
use crate::application::use_cases::{QueryMemoryUseCase, UpsertMemoryUseCase};
use crate::application::validation::first_violation;

/// POST /memory/upsert
#[utoipa::path(
    post,
    path = "/memory/upsert",
    tag = "memory",
    request_body = UpsertMemoryRequest,
    responses(
        (status = 200, description = "Record stored", body = UpsertMemoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn upsert_memory_handler(
    State(use_case): State<Arc<UpsertMemoryUseCase>>,
    payload: Result<Json<UpsertMemoryRequest>, JsonRejection>,
) -> Result<Json<UpsertMemoryResponse>, ApiError> {
    let Json(request) = payload?;
    first_violation(&request, &["user_id", "key", "value"]).map_err(ApiError::validation)?;

    Ok(Json(use_case.execute(request).await?))
}

/// POST /memory/query
#[utoipa::path(
    post,
    path = "/memory/query",
    tag = "memory",
    request_body = QueryMemoryRequest,
    responses(
        (status = 200, description = "Stored value", body = QueryMemoryResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No such record", body = ErrorResponse)
    )
)]
pub async fn query_memory_handler(
    State(use_case): State<Arc<QueryMemoryUseCase>>,
    payload: Result<Json<QueryMemoryRequest>, JsonRejection>,
) -> Result<Json<QueryMemoryResponse>, ApiError> {
    let Json(request) = payload?;
    first_violation(&request, &["user_id", "key"]).map_err(ApiError::validation)?;

    Ok(Json(use_case.execute(request).await?))
}
