//! Maintenance log repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::maintenance_log::{
        parse_temperature, LogFilter, MaintenanceLog, NewLogEntry, UpdateMaintenanceLog,
    },
};

#[derive(Clone)]
pub struct MaintenanceLogsRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Generic filtered log listing, newest first
    pub async fn list(&self, filter: &LogFilter) -> AppResult<Vec<MaintenanceLog>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if filter.work_week.is_some() {
            conditions.push(format!("work_week = ${}", idx));
            idx += 1;
        }
        if filter.since.is_some() {
            conditions.push(format!("check_date >= ${}", idx));
            idx += 1;
        }
        if filter.until.is_some() {
            conditions.push(format!("check_date <= ${}", idx));
            idx += 1;
        }
        if filter.service_in.is_some() {
            conditions.push(format!("service = ANY(${})", idx));
            idx += 1;
        }
        if filter.temp_gte.is_some() {
            conditions.push(format!("pump_temp >= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT * FROM maintenance_log {} ORDER BY check_date DESC, equipment_id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceLog>(&query);
        if let Some(id) = filter.equipment_id {
            builder = builder.bind(id);
        }
        if let Some(ref ww) = filter.work_week {
            builder = builder.bind(ww);
        }
        if let Some(since) = filter.since {
            builder = builder.bind(since);
        }
        if let Some(until) = filter.until {
            builder = builder.bind(until);
        }
        if let Some(ref services) = filter.service_in {
            builder = builder.bind(services);
        }
        if let Some(temp) = filter.temp_gte {
            builder = builder.bind(temp);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// First few log rows, for the status endpoint
    pub async fn sample(&self, limit: i64) -> AppResult<Vec<MaintenanceLog>> {
        let rows = sqlx::query_as::<_, MaintenanceLog>(
            "SELECT * FROM maintenance_log ORDER BY log_id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a log by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceLog> {
        sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_log WHERE log_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance log {} not found", id)))
    }

    /// Total log count
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_log")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Distinct work-week labels, newest first, for the filter dropdown
    pub async fn distinct_work_weeks(&self) -> AppResult<Vec<String>> {
        let weeks: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT work_week FROM maintenance_log ORDER BY work_week DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(weeks)
    }

    /// Update an existing log. Omitted fields keep their stored value; a
    /// provided raw temperature replaces the reading with its parse result.
    pub async fn update(&self, id: i32, data: &UpdateMaintenanceLog) -> AppResult<MaintenanceLog> {
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

        add_field!(data.check_date, "check_date");
        add_field!(data.user_name, "user_name");
        add_field!(data.oil_level_ok, "oil_level_ok");
        add_field!(data.oil_condition_ok, "oil_condition_ok");
        add_field!(data.oil_filter_ok, "oil_filter_ok");
        add_field!(data.pump_temp, "pump_temp");
        add_field!(data.service, "service");
        add_field!(data.service_notes, "service_notes");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE maintenance_log SET {} WHERE log_id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceLog>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.check_date);
        bind_field!(data.user_name);
        bind_field!(data.oil_level_ok);
        bind_field!(data.oil_condition_ok);
        bind_field!(data.oil_filter_ok);
        if let Some(ref raw) = data.pump_temp {
            builder = builder.bind(parse_temperature(raw));
        }
        bind_field!(data.service);
        bind_field!(data.service_notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance log {} not found", id)))
    }

    /// Delete a log
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_log WHERE log_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance log {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Upsert the whole week's checklist in one transaction: one row per
    /// equipment keyed by (equipment_id, work_week), last writer wins.
    pub async fn upsert_week(
        &self,
        work_week: &str,
        check_date: NaiveDate,
        user_name: Option<&str>,
        entries: &[NewLogEntry],
    ) -> AppResult<Vec<MaintenanceLog>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing: Option<i32> = sqlx::query_scalar(
                "SELECT log_id FROM maintenance_log WHERE equipment_id = $1 AND work_week = $2 LIMIT 1",
            )
            .bind(entry.equipment_id)
            .bind(work_week)
            .fetch_optional(&mut *tx)
            .await?;

            let row = match existing {
                Some(log_id) => {
                    sqlx::query_as::<_, MaintenanceLog>(
                        r#"
                        UPDATE maintenance_log
                        SET check_date = $1, user_name = $2, oil_level_ok = $3,
                            oil_condition_ok = $4, oil_filter_ok = $5, pump_temp = $6,
                            service = $7, service_notes = $8
                        WHERE log_id = $9
                        RETURNING *
                        "#,
                    )
                    .bind(check_date)
                    .bind(user_name)
                    .bind(entry.oil_level_ok)
                    .bind(entry.oil_condition_ok)
                    .bind(entry.oil_filter_ok)
                    .bind(entry.pump_temp)
                    .bind(&entry.service)
                    .bind(&entry.service_notes)
                    .bind(log_id)
                    .fetch_one(&mut *tx)
                    .await?
                }
                None => {
                    sqlx::query_as::<_, MaintenanceLog>(
                        r#"
                        INSERT INTO maintenance_log
                            (equipment_id, work_week, check_date, user_name, oil_level_ok,
                             oil_condition_ok, oil_filter_ok, pump_temp, service, service_notes)
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                        RETURNING *
                        "#,
                    )
                    .bind(entry.equipment_id)
                    .bind(work_week)
                    .bind(check_date)
                    .bind(user_name)
                    .bind(entry.oil_level_ok)
                    .bind(entry.oil_condition_ok)
                    .bind(entry.oil_filter_ok)
                    .bind(entry.pump_temp)
                    .bind(&entry.service)
                    .bind(&entry.service_notes)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// Upsert a single equipment's checklist entry for a work week
    pub async fn upsert_one(
        &self,
        work_week: &str,
        check_date: NaiveDate,
        user_name: Option<&str>,
        entry: &NewLogEntry,
    ) -> AppResult<MaintenanceLog> {
        let mut saved = self
            .upsert_week(work_week, check_date, user_name, std::slice::from_ref(entry))
            .await?;
        // upsert_week returns exactly one row per entry
        Ok(saved.remove(0))
    }
}
