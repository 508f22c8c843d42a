//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, backup, equipment, health, logs};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pumptrack API",
        version = "1.0.0",
        description = "Vacuum pump maintenance tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::status_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_equipment_logs,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::delete_equipment_batch,
        equipment::next_equipment_id,
        equipment::equipment_options,
        // Logs
        logs::list_logs,
        logs::get_log,
        logs::update_log,
        logs::delete_log,
        logs::list_work_weeks,
        logs::list_service_options,
        // Weekly checklist
        logs::get_current_weekly_log,
        logs::get_weekly_log,
        logs::save_weekly_log,
        logs::save_equipment_log,
        // Analytics
        analytics::get_dashboard,
        analytics::get_charts,
        analytics::get_hall_of_fame,
        // Backup
        backup::create_backup,
        backup::restore_backup,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::DeleteBatchRequest,
            equipment::DeleteBatchResponse,
            equipment::NextIdResponse,
            // Logs
            crate::models::maintenance_log::MaintenanceLog,
            crate::models::maintenance_log::UpdateMaintenanceLog,
            crate::models::maintenance_log::WeeklyLogForm,
            crate::models::maintenance_log::WeeklyLogEntry,
            crate::models::maintenance_log::EquipmentLogForm,
            crate::models::service::ServiceAction,
            logs::WeeklyLogView,
            // Analytics
            analytics::DashboardResponse,
            analytics::DashboardAlerts,
            analytics::StatEntry,
            analytics::TemperatureChart,
            analytics::TemperatureSeries,
            analytics::ChartDataResponse,
            analytics::HallOfFameEntry,
            // Backup
            backup::BackupSummary,
            backup::RestoreRequest,
            backup::RestoreSummary,
            // Health
            health::HealthResponse,
            health::StatusResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health and status endpoints"),
        (name = "equipment", description = "Equipment registry"),
        (name = "logs", description = "Maintenance log browsing and editing"),
        (name = "weekly-log", description = "Weekly checklist workflow"),
        (name = "analytics", description = "Dashboard, charts and ranking"),
        (name = "backup", description = "JSON backup and restore")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
