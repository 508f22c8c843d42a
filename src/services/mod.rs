//! Business logic services

pub mod analytics;
pub mod backup;
pub mod equipment;
pub mod maintenance_logs;

use crate::{config::BackupConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub logs: maintenance_logs::MaintenanceLogsService,
    pub analytics: analytics::AnalyticsService,
    pub backup: backup::BackupService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, backup_config: BackupConfig) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            logs: maintenance_logs::MaintenanceLogsService::new(repository.clone()),
            analytics: analytics::AnalyticsService::new(repository.clone()),
            backup: backup::BackupService::new(repository, backup_config),
        }
    }
}
