use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::application::ports::{BundleStore, MemoryRepository};

/// What the health endpoint probes
pub struct HealthState {
    bundle_store: Arc<dyn BundleStore>,
    memory_repo: Arc<dyn MemoryRepository>,
    memory_backend: &'static str,
    started_at: Instant,
}

impl HealthState {
    pub fn new(
        bundle_store: Arc<dyn BundleStore>,
        memory_repo: Arc<dyn MemoryRepository>,
        memory_backend: &'static str,
    ) -> Self {
        Self {
            bundle_store,
            memory_repo,
            memory_backend,
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// `ok` or `error`
    pub storage: String,
    /// `ok` or `error`
    pub database: String,
    /// `postgres` or `in-memory`
    pub memory_backend: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` when every service is up, `degraded` otherwise
    pub status: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub version: String,
    pub services: ServiceStatus,
}

fn probe(up: bool) -> String {
    if up { "ok" } else { "error" }.to_string()
}

/// GET /health
/// Liveness plus a probe of storage and the memory store; always 200
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    let storage_up = state.bundle_store.health_check().await;
    let database_up = state.memory_repo.health_check().await;

    Json(HealthResponse {
        status: if storage_up && database_up { "ok" } else { "degraded" }.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatus {
            storage: probe(storage_up),
            database: probe(database_up),
            memory_backend: state.memory_backend.to_string(),
        },
    })
}
