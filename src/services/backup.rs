//! JSON backup and restore
//!
//! Dumps both tables to a timestamped JSON file under the configured
//! backup directory, and restores by wiping and reloading both tables in a
//! single transaction so a failed restore leaves the store untouched.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::backup::{BackupSummary, RestoreSummary},
    config::BackupConfig,
    error::{AppError, AppResult},
    models::{maintenance_log::LogFilter, Equipment, MaintenanceLog},
    repository::Repository,
};

/// On-disk backup file layout
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupFile {
    pub metadata: BackupMetadata,
    pub tables: BackupTables,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub timestamp: DateTime<Utc>,
    pub database_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackupTables {
    pub equipment: Vec<Equipment>,
    pub maintenance_logs: Vec<MaintenanceLog>,
}

#[derive(Clone)]
pub struct BackupService {
    repository: Repository,
    config: BackupConfig,
}

impl BackupService {
    pub fn new(repository: Repository, config: BackupConfig) -> Self {
        Self { repository, config }
    }

    /// Dump all records to a new timestamped JSON file
    pub async fn backup(&self) -> AppResult<BackupSummary> {
        let equipment = self.repository.equipment.list().await?;
        let maintenance_logs = self.repository.logs.list(&LogFilter::default()).await?;

        let timestamp = Utc::now();
        let payload = BackupFile {
            metadata: BackupMetadata {
                timestamp,
                database_type: "PostgreSQL".to_string(),
            },
            tables: BackupTables {
                equipment,
                maintenance_logs,
            },
        };

        tokio::fs::create_dir_all(&self.config.dir).await?;
        let file = PathBuf::from(&self.config.dir).join(format!(
            "db_backup_{}.json",
            timestamp.format("%Y%m%d_%H%M%S")
        ));
        let json = serde_json::to_vec_pretty(&payload)
            .map_err(|e| AppError::Internal(format!("Failed to serialize backup: {}", e)))?;
        tokio::fs::write(&file, json).await?;

        tracing::info!(
            "Backed up {} equipment and {} log records to {}",
            payload.tables.equipment.len(),
            payload.tables.maintenance_logs.len(),
            file.display()
        );

        Ok(BackupSummary {
            file: file.display().to_string(),
            equipment_count: payload.tables.equipment.len() as i64,
            logs_count: payload.tables.maintenance_logs.len() as i64,
        })
    }

    /// Replace all records with the contents of a backup file
    pub async fn restore(&self, path: &Path) -> AppResult<RestoreSummary> {
        let bytes = tokio::fs::read(path).await?;
        let payload: BackupFile = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Validation(format!("Invalid backup file: {}", e)))?;

        let mut tx = self.repository.pool.begin().await?;

        sqlx::query("DELETE FROM maintenance_log")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM equipment").execute(&mut *tx).await?;

        for item in &payload.tables.equipment {
            sqlx::query(
                r#"
                INSERT INTO equipment (equipment_id, equipment_name, pump_model, oil_type, pump_owner, status, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.equipment_id)
            .bind(&item.equipment_name)
            .bind(&item.pump_model)
            .bind(&item.oil_type)
            .bind(&item.pump_owner)
            .bind(&item.status)
            .bind(&item.notes)
            .execute(&mut *tx)
            .await?;
        }

        for log in &payload.tables.maintenance_logs {
            sqlx::query(
                r#"
                INSERT INTO maintenance_log
                    (log_id, equipment_id, work_week, check_date, user_name, oil_level_ok,
                     oil_condition_ok, oil_filter_ok, pump_temp, service, service_notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(log.log_id)
            .bind(log.equipment_id)
            .bind(&log.work_week)
            .bind(log.check_date)
            .bind(&log.user_name)
            .bind(log.oil_level_ok)
            .bind(log.oil_condition_ok)
            .bind(log.oil_filter_ok)
            .bind(log.pump_temp)
            .bind(&log.service)
            .bind(&log.service_notes)
            .execute(&mut *tx)
            .await?;
        }

        // restored rows carried explicit ids, so realign the sequence
        sqlx::query(
            r#"
            SELECT setval(
                pg_get_serial_sequence('maintenance_log', 'log_id'),
                COALESCE((SELECT MAX(log_id) FROM maintenance_log), 0) + 1,
                false
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Restored {} equipment and {} log records from {}",
            payload.tables.equipment.len(),
            payload.tables.maintenance_logs.len(),
            path.display()
        );

        Ok(RestoreSummary {
            equipment_count: payload.tables.equipment.len() as i64,
            logs_count: payload.tables.maintenance_logs.len() as i64,
        })
    }
}
