//! Health and status endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Equipment, MaintenanceLog},
};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Database status response: record counts plus a few sample rows
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub equipment_count: i64,
    pub logs_count: i64,
    pub equipment_sample: Vec<Equipment>,
    pub logs_sample: Vec<MaintenanceLog>,
}

/// Database status endpoint, for deployment checks
#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable, with record counts", body = StatusResponse)
    )
)]
pub async fn status_check(
    State(state): State<crate::AppState>,
) -> AppResult<Json<StatusResponse>> {
    let equipment_count = state.services.equipment.count().await?;
    let logs_count = state.services.logs.count().await?;
    let equipment_sample = state.services.equipment.sample(3).await?;
    let logs_sample = state.services.logs.sample(3).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        equipment_count,
        logs_count,
        equipment_sample,
        logs_sample,
    }))
}
