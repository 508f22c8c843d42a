//! Dashboard, chart and ranking endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Equipment, MaintenanceLog},
};

/// Dashboard payload
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Label of the current maintenance period
    pub current_work_week: String,
    pub alerts: DashboardAlerts,
    /// Percentage of equipment checked within the last 7 days
    pub maintenance_rate: f64,
    /// Logs recorded for the current work week, in asset-number order
    pub current_logs: Vec<MaintenanceLog>,
}

/// Equipment needing attention, from logs in the last 14 days
#[derive(Serialize, ToSchema)]
pub struct DashboardAlerts {
    /// Equipment whose recent service was an oil top-up or change
    pub needs_oil: Vec<Equipment>,
    /// Equipment with a recent temperature reading of 80 or more
    pub high_temp: Vec<Equipment>,
}

/// One labelled count in a summary aggregation
#[derive(Debug, Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// Temperature trend over the trailing 60 days
#[derive(Serialize, ToSchema)]
pub struct TemperatureChart {
    /// Sorted distinct reading dates as "YYYY-MM-DD"
    pub labels: Vec<String>,
    pub series: Vec<TemperatureSeries>,
}

/// One equipment's temperature readings; dates without a reading are null
#[derive(Serialize, ToSchema)]
pub struct TemperatureSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Chart payload
#[derive(Serialize, ToSchema)]
pub struct ChartDataResponse {
    pub temperature: TemperatureChart,
    /// All-time log count per equipment
    pub maintenance_counts: Vec<StatEntry>,
    /// All-time log count per service action
    pub service_histogram: Vec<StatEntry>,
}

/// One owner's entry in the maintenance ranking
#[derive(Debug, Serialize, ToSchema)]
pub struct HallOfFameEntry {
    /// Position in the ranking, starting at 1
    pub rank: i64,
    pub name: String,
    /// Summed weekly scores, one decimal place
    pub score: f64,
    pub equipment_owned: i64,
    pub weeks_active: i64,
}

/// Dashboard: alerts, maintenance rate and the current week's logs
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "analytics",
    responses(
        (status = 200, description = "Dashboard payload", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.services.analytics.dashboard().await?;
    Ok(Json(dashboard))
}

/// Chart data: temperature trend, per-equipment counts and the service
/// histogram
#[utoipa::path(
    get,
    path = "/charts",
    tag = "analytics",
    responses(
        (status = 200, description = "Chart payload", body = ChartDataResponse)
    )
)]
pub async fn get_charts(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ChartDataResponse>> {
    let charts = state.services.analytics.charts().await?;
    Ok(Json(charts))
}

/// Owner maintenance ranking over the weekly-rotation equipment
#[utoipa::path(
    get,
    path = "/hall-of-fame",
    tag = "analytics",
    responses(
        (status = 200, description = "Owner ranking", body = Vec<HallOfFameEntry>)
    )
)]
pub async fn get_hall_of_fame(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<HallOfFameEntry>>> {
    let ranking = state.services.analytics.hall_of_fame().await?;
    Ok(Json(ranking))
}
