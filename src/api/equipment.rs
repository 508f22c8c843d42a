//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        maintenance_log::LogFilter,
        MaintenanceLog,
    },
};

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Maintenance history for one piece of equipment, newest first
#[utoipa::path(
    get,
    path = "/equipment/{id}/logs",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Maintenance logs for the equipment", body = Vec<MaintenanceLog>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_equipment_logs(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    state.services.equipment.get_by_id(id).await?;
    let filter = LogFilter {
        equipment_id: Some(id),
        ..Default::default()
    };
    let logs = state.services.logs.list(&filter).await?;
    Ok(Json(logs))
}

/// Register equipment with a caller-assigned asset number
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 409, description = "Asset number already in use")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment and its maintenance logs
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Batch delete request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteBatchRequest {
    pub equipment_ids: Vec<i32>,
}

/// Batch delete result
#[derive(Serialize, ToSchema)]
pub struct DeleteBatchResponse {
    pub deleted: u64,
}

/// Delete several equipment records at once
#[utoipa::path(
    post,
    path = "/equipment/delete-batch",
    tag = "equipment",
    request_body = DeleteBatchRequest,
    responses(
        (status = 200, description = "Number of equipment records deleted", body = DeleteBatchResponse)
    )
)]
pub async fn delete_equipment_batch(
    State(state): State<crate::AppState>,
    Json(data): Json<DeleteBatchRequest>,
) -> AppResult<Json<DeleteBatchResponse>> {
    if data.equipment_ids.is_empty() {
        return Err(AppError::Validation(
            "No equipment selected for deletion".to_string(),
        ));
    }
    let deleted = state
        .services
        .equipment
        .delete_many(&data.equipment_ids)
        .await?;
    Ok(Json(DeleteBatchResponse { deleted }))
}

/// Next free asset number
#[derive(Serialize, ToSchema)]
pub struct NextIdResponse {
    pub next_id: i32,
}

/// Suggest the next free asset number for the add form
#[utoipa::path(
    get,
    path = "/equipment/next-id",
    tag = "equipment",
    responses(
        (status = 200, description = "Next free asset number", body = NextIdResponse)
    )
)]
pub async fn next_equipment_id(
    State(state): State<crate::AppState>,
) -> AppResult<Json<NextIdResponse>> {
    let next_id = state.services.equipment.next_id().await?;
    Ok(Json(NextIdResponse { next_id }))
}

/// Distinct values of an equipment column, for form dropdowns. Only
/// pump_model, oil_type and pump_owner are enumerable; any other field
/// yields an empty list.
#[utoipa::path(
    get,
    path = "/equipment/options/{field}",
    tag = "equipment",
    params(("field" = String, Path, description = "Column to enumerate")),
    responses(
        (status = 200, description = "Distinct values", body = Vec<String>)
    )
)]
pub async fn equipment_options(
    State(state): State<crate::AppState>,
    Path(field): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let values = state.services.equipment.distinct_values(&field).await?;
    Ok(Json(values))
}
