//! Backup and restore endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Result of a backup run
#[derive(Serialize, ToSchema)]
pub struct BackupSummary {
    /// Path of the JSON file that was written
    pub file: String,
    pub equipment_count: i64,
    pub logs_count: i64,
}

/// Restore request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RestoreRequest {
    /// Path of the backup file to load
    pub file: String,
}

/// Result of a restore run
#[derive(Serialize, ToSchema)]
pub struct RestoreSummary {
    pub equipment_count: i64,
    pub logs_count: i64,
}

/// Write a JSON backup of all records to the backup directory
#[utoipa::path(
    post,
    path = "/backup",
    tag = "backup",
    responses(
        (status = 200, description = "Backup written", body = BackupSummary)
    )
)]
pub async fn create_backup(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BackupSummary>> {
    let summary = state.services.backup.backup().await?;
    Ok(Json(summary))
}

/// Replace all records with the contents of a backup file
#[utoipa::path(
    post,
    path = "/restore",
    tag = "backup",
    request_body = RestoreRequest,
    responses(
        (status = 200, description = "Records restored", body = RestoreSummary),
        (status = 400, description = "Backup file is malformed")
    )
)]
pub async fn restore_backup(
    State(state): State<crate::AppState>,
    Json(request): Json<RestoreRequest>,
) -> AppResult<Json<RestoreSummary>> {
    let summary = state
        .services
        .backup
        .restore(Path::new(&request.file))
        .await?;
    Ok(Json(summary))
}
