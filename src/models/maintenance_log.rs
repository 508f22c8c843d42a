//! Maintenance log model and weekly checklist forms

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::service::default_service;

/// One weekly inspection record for one piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceLog {
    pub log_id: i32,
    pub equipment_id: i32,
    /// ISO week label of the maintenance period, e.g. "2025-WW14".
    /// Stored as entered; never recomputed from check_date afterwards.
    pub work_week: String,
    pub check_date: NaiveDate,
    /// Person who performed the check (not necessarily the pump owner)
    pub user_name: Option<String>,
    pub oil_level_ok: bool,
    pub oil_condition_ok: bool,
    pub oil_filter_ok: bool,
    /// Measured pump temperature; absent when unmeasured or unparsable
    pub pump_temp: Option<f64>,
    /// Action taken; standard option or free text
    pub service: String,
    pub service_notes: Option<String>,
}

/// Parse a raw temperature reading from a form field.
///
/// Blank or non-numeric input means "not measured" and is stored as absent
/// rather than rejected. Out-of-range values pass through untouched; the
/// dashboard flags them as alerts instead. Non-finite parses are treated as
/// unparsable since the stored value must be a finite float.
pub fn parse_temperature(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|t| t.is_finite())
}

/// One equipment's checklist entry within a weekly submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WeeklyLogEntry {
    pub equipment_id: i32,
    #[serde(default)]
    pub oil_level_ok: bool,
    #[serde(default)]
    pub oil_condition_ok: bool,
    #[serde(default)]
    pub oil_filter_ok: bool,
    /// Raw temperature text; blank or unparsable input is stored as absent
    pub pump_temp: Option<String>,
    #[serde(default = "default_service")]
    pub service: String,
    pub service_notes: Option<String>,
}

/// Bulk weekly checklist submission, one entry per equipment
#[derive(Debug, Deserialize, ToSchema)]
pub struct WeeklyLogForm {
    /// Date the checks were performed, shared by every entry
    pub check_date: NaiveDate,
    /// Person performing the checks, shared by every entry
    pub user_name: Option<String>,
    pub entries: Vec<WeeklyLogEntry>,
}

/// Checklist submission for a single piece of equipment
#[derive(Debug, Deserialize, ToSchema)]
pub struct EquipmentLogForm {
    pub check_date: NaiveDate,
    pub user_name: Option<String>,
    #[serde(default)]
    pub oil_level_ok: bool,
    #[serde(default)]
    pub oil_condition_ok: bool,
    #[serde(default)]
    pub oil_filter_ok: bool,
    /// Raw temperature text; blank or unparsable input is stored as absent
    pub pump_temp: Option<String>,
    #[serde(default = "default_service")]
    pub service: String,
    pub service_notes: Option<String>,
}

/// Parsed checklist values ready for storage
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub equipment_id: i32,
    pub oil_level_ok: bool,
    pub oil_condition_ok: bool,
    pub oil_filter_ok: bool,
    pub pump_temp: Option<f64>,
    pub service: String,
    pub service_notes: Option<String>,
}

impl From<WeeklyLogEntry> for NewLogEntry {
    fn from(entry: WeeklyLogEntry) -> Self {
        Self {
            equipment_id: entry.equipment_id,
            oil_level_ok: entry.oil_level_ok,
            oil_condition_ok: entry.oil_condition_ok,
            oil_filter_ok: entry.oil_filter_ok,
            pump_temp: entry.pump_temp.as_deref().and_then(parse_temperature),
            service: entry.service,
            service_notes: entry.service_notes,
        }
    }
}

/// Update request for an existing log. Omitted fields keep their stored
/// value; a provided pump_temp replaces the reading with whatever the raw
/// text parses to (so blank text clears it).
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMaintenanceLog {
    pub check_date: Option<NaiveDate>,
    pub user_name: Option<String>,
    pub oil_level_ok: Option<bool>,
    pub oil_condition_ok: Option<bool>,
    pub oil_filter_ok: Option<bool>,
    pub pump_temp: Option<String>,
    pub service: Option<String>,
    pub service_notes: Option<String>,
}

/// Filters for the generic log listing
#[derive(Debug, Default, Clone)]
pub struct LogFilter {
    pub equipment_id: Option<i32>,
    pub work_week: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub service_in: Option<Vec<String>>,
    pub temp_gte: Option<f64>,
}
