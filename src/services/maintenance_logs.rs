//! Maintenance log service, including the weekly checklist workflow

use std::collections::{BTreeMap, HashSet};

use crate::{
    api::logs::WeeklyLogView,
    error::{AppError, AppResult},
    models::{
        maintenance_log::{
            parse_temperature, EquipmentLogForm, LogFilter, MaintenanceLog, NewLogEntry,
            UpdateMaintenanceLog, WeeklyLogForm,
        },
        service::ServiceAction,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceLogsService {
    repository: Repository,
}

impl MaintenanceLogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &LogFilter) -> AppResult<Vec<MaintenanceLog>> {
        self.repository.logs.list(filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceLog> {
        self.repository.logs.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateMaintenanceLog) -> AppResult<MaintenanceLog> {
        self.repository.logs.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.logs.delete(id).await
    }

    /// Work-week labels that have at least one log, for the filter dropdown
    pub async fn work_weeks(&self) -> AppResult<Vec<String>> {
        self.repository.logs.distinct_work_weeks().await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.logs.count().await
    }

    pub async fn sample(&self, limit: i64) -> AppResult<Vec<MaintenanceLog>> {
        self.repository.logs.sample(limit).await
    }

    /// Assemble the weekly checklist form state: the equipment in the
    /// weekly rotation, any logs already recorded for the week keyed by
    /// equipment, and the name the week's checks were filed under.
    pub async fn weekly_view(&self, work_week: &str) -> AppResult<WeeklyLogView> {
        let equipment: Vec<_> = self
            .repository
            .equipment
            .list()
            .await?
            .into_iter()
            .filter(|e| e.in_weekly_rotation())
            .collect();

        let filter = LogFilter {
            work_week: Some(work_week.to_string()),
            ..Default::default()
        };
        let week_logs = self.repository.logs.list(&filter).await?;

        let user_name = week_logs.iter().find_map(|l| l.user_name.clone());
        let mut logs = BTreeMap::new();
        for log in week_logs {
            logs.insert(log.equipment_id, log);
        }

        Ok(WeeklyLogView {
            work_week: work_week.to_string(),
            current_date: chrono::Utc::now().date_naive(),
            user_name,
            service_options: ServiceAction::standard_labels()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            equipment,
            logs,
        })
    }

    /// Upsert the whole week's checklist. Every entry must reference known
    /// equipment; the write is all-or-nothing.
    pub async fn save_week(
        &self,
        work_week: &str,
        form: WeeklyLogForm,
    ) -> AppResult<Vec<MaintenanceLog>> {
        let known: HashSet<i32> = self
            .repository
            .equipment
            .list()
            .await?
            .iter()
            .map(|e| e.equipment_id)
            .collect();
        for entry in &form.entries {
            if !known.contains(&entry.equipment_id) {
                return Err(AppError::Validation(format!(
                    "Unknown equipment {} in weekly log",
                    entry.equipment_id
                )));
            }
        }

        let entries: Vec<NewLogEntry> = form.entries.into_iter().map(NewLogEntry::from).collect();
        self.repository
            .logs
            .upsert_week(
                work_week,
                form.check_date,
                form.user_name.as_deref(),
                &entries,
            )
            .await
    }

    /// Upsert a single equipment's checklist entry for a work week
    pub async fn save_one(
        &self,
        work_week: &str,
        equipment_id: i32,
        form: EquipmentLogForm,
    ) -> AppResult<MaintenanceLog> {
        // 404 before writing anything
        self.repository.equipment.get_by_id(equipment_id).await?;

        let entry = NewLogEntry {
            equipment_id,
            oil_level_ok: form.oil_level_ok,
            oil_condition_ok: form.oil_condition_ok,
            oil_filter_ok: form.oil_filter_ok,
            pump_temp: form.pump_temp.as_deref().and_then(parse_temperature),
            service: form.service,
            service_notes: form.service_notes,
        };
        self.repository
            .logs
            .upsert_one(work_week, form.check_date, form.user_name.as_deref(), &entry)
            .await
    }
}
