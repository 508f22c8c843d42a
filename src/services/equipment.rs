//! Equipment service

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Delete a batch of equipment, returning how many were removed
    pub async fn delete_many(&self, ids: &[i32]) -> AppResult<u64> {
        self.repository.equipment.delete_many(ids).await
    }

    /// Next free asset number, for the add form
    pub async fn next_id(&self) -> AppResult<i32> {
        self.repository.equipment.next_id().await
    }

    /// Distinct values of an equipment column, for form dropdowns
    pub async fn distinct_values(&self, field: &str) -> AppResult<Vec<String>> {
        self.repository.equipment.distinct_values(field).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.equipment.count().await
    }

    pub async fn sample(&self, limit: i64) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.sample(limit).await
    }
}
