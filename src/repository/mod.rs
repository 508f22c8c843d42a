//! Repository layer for database operations

pub mod equipment;
pub mod maintenance_logs;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub logs: maintenance_logs::MaintenanceLogsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            logs: maintenance_logs::MaintenanceLogsRepository::new(pool.clone()),
            pool,
        }
    }
}
