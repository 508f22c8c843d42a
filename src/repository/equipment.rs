//! Equipment repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

/// Equipment columns the dropdown-options endpoint may enumerate
const DISTINCT_FIELDS: [&str; 3] = ["pump_model", "oil_type", "pump_owner"];

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment ordered by asset number
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY equipment_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// First few equipment rows, for the status endpoint
    pub async fn sample(&self, limit: i64) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY equipment_id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE equipment_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment with a caller-assigned asset number
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM equipment WHERE equipment_id = $1)")
                .bind(data.equipment_id)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Equipment {} already exists",
                data.equipment_id
            )));
        }

        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (equipment_id, equipment_name, pump_model, oil_type, pump_owner, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(&data.equipment_name)
        .bind(&data.pump_model)
        .bind(&data.oil_type)
        .bind(&data.pump_owner)
        .bind(data.status.as_deref().unwrap_or("active"))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment in place
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.equipment_name, "equipment_name");
        add_field!(data.pump_model, "pump_model");
        add_field!(data.oil_type, "oil_type");
        add_field!(data.pump_owner, "pump_owner");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE equipment SET {} WHERE equipment_id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.equipment_name);
        bind_field!(data.pump_model);
        bind_field!(data.oil_type);
        bind_field!(data.pump_owner);
        bind_field!(data.status);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment; maintenance logs cascade
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE equipment_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Delete a batch of equipment, returning how many rows went away
    pub async fn delete_many(&self, ids: &[i32]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM equipment WHERE equipment_id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Total equipment count
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Next free asset number, for the add form
    pub async fn next_id(&self) -> AppResult<i32> {
        let next: i32 =
            sqlx::query_scalar("SELECT COALESCE(MAX(equipment_id), 0) + 1 FROM equipment")
                .fetch_one(&self.pool)
                .await?;
        Ok(next)
    }

    /// Distinct non-null values of an equipment column, for form dropdowns.
    /// Unknown fields yield an empty list rather than an error.
    pub async fn distinct_values(&self, field: &str) -> AppResult<Vec<String>> {
        if !DISTINCT_FIELDS.contains(&field) {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT DISTINCT {field} FROM equipment WHERE {field} IS NOT NULL ORDER BY {field}"
        );
        let values: Vec<String> = sqlx::query_scalar(&query).fetch_all(&self.pool).await?;
        Ok(values)
    }
}
