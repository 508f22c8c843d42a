//! Maintenance log endpoints and the weekly checklist workflow

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        maintenance_log::{
            EquipmentLogForm, LogFilter, MaintenanceLog, UpdateMaintenanceLog, WeeklyLogForm,
        },
        service::ServiceAction,
        work_week, Equipment,
    },
};

/// Query parameters for the log listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LogsQuery {
    /// Restrict to one work week, e.g. "2025-WW14"
    pub work_week: Option<String>,
    /// Restrict to one piece of equipment
    pub equipment_id: Option<i32>,
}

/// Browse maintenance logs, newest first
#[utoipa::path(
    get,
    path = "/logs",
    tag = "logs",
    params(LogsQuery),
    responses(
        (status = 200, description = "Maintenance logs", body = Vec<MaintenanceLog>)
    )
)]
pub async fn list_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<LogsQuery>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    let filter = LogFilter {
        equipment_id: query.equipment_id,
        work_week: query.work_week,
        ..Default::default()
    };
    let logs = state.services.logs.list(&filter).await?;
    Ok(Json(logs))
}

/// Get a maintenance log by ID
#[utoipa::path(
    get,
    path = "/logs/{id}",
    tag = "logs",
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 200, description = "Maintenance log", body = MaintenanceLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn get_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceLog>> {
    let log = state.services.logs.get_by_id(id).await?;
    Ok(Json(log))
}

/// Edit a maintenance log
#[utoipa::path(
    put,
    path = "/logs/{id}",
    tag = "logs",
    params(("id" = i32, Path, description = "Log ID")),
    request_body = UpdateMaintenanceLog,
    responses(
        (status = 200, description = "Log updated", body = MaintenanceLog),
        (status = 404, description = "Log not found")
    )
)]
pub async fn update_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceLog>,
) -> AppResult<Json<MaintenanceLog>> {
    let log = state.services.logs.update(id, &data).await?;
    Ok(Json(log))
}

/// Delete a maintenance log
#[utoipa::path(
    delete,
    path = "/logs/{id}",
    tag = "logs",
    params(("id" = i32, Path, description = "Log ID")),
    responses(
        (status = 204, description = "Log deleted"),
        (status = 404, description = "Log not found")
    )
)]
pub async fn delete_log(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.logs.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Work weeks that have logs, newest first, for the filter dropdown
#[utoipa::path(
    get,
    path = "/logs/work-weeks",
    tag = "logs",
    responses(
        (status = 200, description = "Distinct work-week labels", body = Vec<String>)
    )
)]
pub async fn list_work_weeks(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<String>>> {
    let weeks = state.services.logs.work_weeks().await?;
    Ok(Json(weeks))
}

/// Standard service actions offered by the log form dropdown. Free text is
/// also accepted when recording a log.
#[utoipa::path(
    get,
    path = "/logs/service-options",
    tag = "logs",
    responses(
        (status = 200, description = "Standard service actions", body = Vec<String>)
    )
)]
pub async fn list_service_options() -> Json<Vec<String>> {
    Json(
        ServiceAction::standard_labels()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Weekly checklist form state
#[derive(Serialize, ToSchema)]
pub struct WeeklyLogView {
    pub work_week: String,
    /// Today's date, the form default for check_date
    pub current_date: NaiveDate,
    /// Name the week's existing checks were filed under, if any
    pub user_name: Option<String>,
    /// Standard service actions for the dropdown
    pub service_options: Vec<String>,
    /// Equipment in the weekly rotation (scroll pumps and spares excluded)
    pub equipment: Vec<Equipment>,
    /// Existing logs for the week, keyed by equipment ID
    pub logs: BTreeMap<i32, MaintenanceLog>,
}

/// Fetch the weekly checklist state for the current work week
#[utoipa::path(
    get,
    path = "/weekly-log",
    tag = "weekly-log",
    responses(
        (status = 200, description = "Weekly checklist state for the current week", body = WeeklyLogView)
    )
)]
pub async fn get_current_weekly_log(
    State(state): State<crate::AppState>,
) -> AppResult<Json<WeeklyLogView>> {
    let week = work_week::current_work_week();
    let view = state.services.logs.weekly_view(&week).await?;
    Ok(Json(view))
}

/// Fetch the weekly checklist state for a work week
#[utoipa::path(
    get,
    path = "/weekly-log/{work_week}",
    tag = "weekly-log",
    params(("work_week" = String, Path, description = "Work-week label, e.g. 2025-WW14")),
    responses(
        (status = 200, description = "Weekly checklist state", body = WeeklyLogView)
    )
)]
pub async fn get_weekly_log(
    State(state): State<crate::AppState>,
    Path(work_week): Path<String>,
) -> AppResult<Json<WeeklyLogView>> {
    let view = state.services.logs.weekly_view(&work_week).await?;
    Ok(Json(view))
}

/// Submit the weekly checklist: upserts one log per equipment keyed by
/// (equipment, work week), as a single transaction
#[utoipa::path(
    put,
    path = "/weekly-log/{work_week}",
    tag = "weekly-log",
    params(("work_week" = String, Path, description = "Work-week label, e.g. 2025-WW14")),
    request_body = WeeklyLogForm,
    responses(
        (status = 200, description = "Saved logs for the week", body = Vec<MaintenanceLog>),
        (status = 400, description = "Unknown equipment in submission")
    )
)]
pub async fn save_weekly_log(
    State(state): State<crate::AppState>,
    Path(work_week): Path<String>,
    Json(form): Json<WeeklyLogForm>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    let saved = state.services.logs.save_week(&work_week, form).await?;
    Ok(Json(saved))
}

/// Submit one equipment's checklist entry for a work week
#[utoipa::path(
    put,
    path = "/weekly-log/{work_week}/equipment/{id}",
    tag = "weekly-log",
    params(
        ("work_week" = String, Path, description = "Work-week label, e.g. 2025-WW14"),
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = EquipmentLogForm,
    responses(
        (status = 200, description = "Saved log", body = MaintenanceLog),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn save_equipment_log(
    State(state): State<crate::AppState>,
    Path((work_week, id)): Path<(String, i32)>,
    Json(form): Json<EquipmentLogForm>,
) -> AppResult<Json<MaintenanceLog>> {
    let saved = state.services.logs.save_one(&work_week, id, form).await?;
    Ok(Json(saved))
}
