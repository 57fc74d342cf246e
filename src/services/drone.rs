//! Drone fleet service

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{new_id, CreateDroneRequest, Drone, UpdateDroneRequest};

#[derive(Clone)]
pub struct DroneService {
    db_pool: SqlitePool,
}

impl DroneService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_drones(&self) -> Result<Vec<Drone>, ApiError> {
        let drones =
            sqlx::query_as::<_, Drone>("SELECT * FROM drones ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.db_pool)
                .await?;

        Ok(drones)
    }

    pub async fn get_drone(&self, id: &str) -> Result<Drone, ApiError> {
        sqlx::query_as::<_, Drone>("SELECT * FROM drones WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Drone {} not found", id)))
    }

    pub async fn create_drone(&self, request: CreateDroneRequest) -> Result<Drone, ApiError> {
        let id = new_id("D_");
        let now = Utc::now();

        let status = request.status.unwrap_or_else(|| "Inactive".to_string());
        let battery_pct = request.battery_pct.unwrap_or(100);
        let payload_capacity_grams = request.payload_capacity_grams.unwrap_or(2000);
        let camera_status = request.camera_status.unwrap_or_else(|| "OK".to_string());
        let signal_status = request.signal_status.unwrap_or_else(|| "OK".to_string());

        sqlx::query(
            r#"
            INSERT INTO drones (
                id, name, model, status, battery_pct, payload_capacity_grams,
                camera_status, signal_status, base_assigned, route_assigned,
                missions_completed, litter_collected, last_maintenance_at,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, NULL, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.model)
        .bind(status)
        .bind(battery_pct)
        .bind(payload_capacity_grams)
        .bind(camera_status)
        .bind(signal_status)
        .bind(&request.base_assigned)
        .bind(&request.route_assigned)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_drone(&id).await
    }

    pub async fn update_drone(
        &self,
        id: &str,
        request: UpdateDroneRequest,
    ) -> Result<Drone, ApiError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE drones SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &request.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(model) = &request.model {
            query_builder.push(", model = ");
            query_builder.push_bind(model.clone());
        }
        if let Some(status) = &request.status {
            query_builder.push(", status = ");
            query_builder.push_bind(status.clone());
        }
        if let Some(battery_pct) = request.battery_pct {
            query_builder.push(", battery_pct = ");
            query_builder.push_bind(battery_pct);
        }
        if let Some(payload_capacity_grams) = request.payload_capacity_grams {
            query_builder.push(", payload_capacity_grams = ");
            query_builder.push_bind(payload_capacity_grams);
        }
        if let Some(camera_status) = &request.camera_status {
            query_builder.push(", camera_status = ");
            query_builder.push_bind(camera_status.clone());
        }
        if let Some(signal_status) = &request.signal_status {
            query_builder.push(", signal_status = ");
            query_builder.push_bind(signal_status.clone());
        }
        if let Some(base_assigned) = &request.base_assigned {
            query_builder.push(", base_assigned = ");
            query_builder.push_bind(base_assigned.clone());
        }
        if let Some(route_assigned) = &request.route_assigned {
            query_builder.push(", route_assigned = ");
            query_builder.push_bind(route_assigned.clone());
        }
        if let Some(missions_completed) = request.missions_completed {
            query_builder.push(", missions_completed = ");
            query_builder.push_bind(missions_completed);
        }
        if let Some(litter_collected) = request.litter_collected {
            query_builder.push(", litter_collected = ");
            query_builder.push_bind(litter_collected);
        }
        if let Some(last_maintenance_at) = request.last_maintenance_at {
            query_builder.push(", last_maintenance_at = ");
            query_builder.push_bind(last_maintenance_at);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());

        let result = query_builder.build().execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Drone {} not found", id)));
        }

        self.get_drone(id).await
    }

    pub async fn delete_drone(&self, id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM drones WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Drone {} not found", id)));
        }

        Ok(())
    }
}
