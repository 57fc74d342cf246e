//! Patrol route service

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{new_id, CreateRouteRequest, PatrolRoute, UpdateRouteRequest};

#[derive(Clone)]
pub struct RouteService {
    db_pool: SqlitePool,
}

impl RouteService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_routes(&self) -> Result<Vec<PatrolRoute>, ApiError> {
        let routes =
            sqlx::query_as::<_, PatrolRoute>("SELECT * FROM routes ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.db_pool)
                .await?;

        Ok(routes)
    }

    pub async fn get_route(&self, id: &str) -> Result<PatrolRoute, ApiError> {
        sqlx::query_as::<_, PatrolRoute>("SELECT * FROM routes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Route {} not found", id)))
    }

    pub async fn create_route(&self, request: CreateRouteRequest) -> Result<PatrolRoute, ApiError> {
        let id = new_id("RT_");
        let now = Utc::now();

        let mission_frequency = request
            .mission_frequency
            .unwrap_or_else(|| "Daily".to_string());
        let litter_capacity = request
            .litter_capacity
            .unwrap_or_else(|| "15 litres".to_string());
        let status = request.status.unwrap_or_else(|| "Active".to_string());

        sqlx::query(
            r#"
            INSERT INTO routes (
                id, name, distance, base_assigned, drone_assigned,
                mission_frequency, litter_capacity, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.distance)
        .bind(&request.base_assigned)
        .bind(&request.drone_assigned)
        .bind(mission_frequency)
        .bind(litter_capacity)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_route(&id).await
    }

    pub async fn update_route(
        &self,
        id: &str,
        request: UpdateRouteRequest,
    ) -> Result<PatrolRoute, ApiError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE routes SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &request.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(distance) = &request.distance {
            query_builder.push(", distance = ");
            query_builder.push_bind(distance.clone());
        }
        if let Some(mission_frequency) = &request.mission_frequency {
            query_builder.push(", mission_frequency = ");
            query_builder.push_bind(mission_frequency.clone());
        }
        if let Some(litter_capacity) = &request.litter_capacity {
            query_builder.push(", litter_capacity = ");
            query_builder.push_bind(litter_capacity.clone());
        }
        if let Some(base_assigned) = &request.base_assigned {
            query_builder.push(", base_assigned = ");
            query_builder.push_bind(base_assigned.clone());
        }
        if let Some(drone_assigned) = &request.drone_assigned {
            query_builder.push(", drone_assigned = ");
            query_builder.push_bind(drone_assigned.clone());
        }
        if let Some(status) = &request.status {
            query_builder.push(", status = ");
            query_builder.push_bind(status.clone());
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());

        let result = query_builder.build().execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Route {} not found", id)));
        }

        self.get_route(id).await
    }

    pub async fn delete_route(&self, id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Route {} not found", id)));
        }

        Ok(())
    }
}
