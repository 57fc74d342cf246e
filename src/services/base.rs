//! Base station service

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{new_id, BaseStation, CreateBaseRequest, UpdateBaseRequest};

#[derive(Clone)]
pub struct BaseService {
    db_pool: SqlitePool,
}

impl BaseService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_bases(&self) -> Result<Vec<BaseStation>, ApiError> {
        let bases =
            sqlx::query_as::<_, BaseStation>("SELECT * FROM bases ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.db_pool)
                .await?;

        Ok(bases)
    }

    pub async fn get_base(&self, id: &str) -> Result<BaseStation, ApiError> {
        sqlx::query_as::<_, BaseStation>("SELECT * FROM bases WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Base {} not found", id)))
    }

    pub async fn create_base(&self, request: CreateBaseRequest) -> Result<BaseStation, ApiError> {
        let id = new_id("B_");
        let now = Utc::now();

        let litter_capacity_pct = request.litter_capacity_pct.unwrap_or(0);
        let status = request.status.unwrap_or_else(|| "Available".to_string());

        sqlx::query(
            r#"
            INSERT INTO bases (
                id, name, servicing_address, what3words, litter_capacity_pct,
                status, drones_assigned, routes_assigned, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.servicing_address)
        .bind(&request.what3words)
        .bind(litter_capacity_pct)
        .bind(status)
        .bind(Json(&request.drones_assigned))
        .bind(Json(&request.routes_assigned))
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_base(&id).await
    }

    pub async fn update_base(
        &self,
        id: &str,
        request: UpdateBaseRequest,
    ) -> Result<BaseStation, ApiError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE bases SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &request.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(servicing_address) = &request.servicing_address {
            query_builder.push(", servicing_address = ");
            query_builder.push_bind(servicing_address.clone());
        }
        if let Some(what3words) = &request.what3words {
            query_builder.push(", what3words = ");
            query_builder.push_bind(what3words.clone());
        }
        if let Some(litter_capacity_pct) = request.litter_capacity_pct {
            query_builder.push(", litter_capacity_pct = ");
            query_builder.push_bind(litter_capacity_pct);
        }
        if let Some(status) = &request.status {
            query_builder.push(", status = ");
            query_builder.push_bind(status.clone());
        }
        if let Some(drones_assigned) = &request.drones_assigned {
            query_builder.push(", drones_assigned = ");
            query_builder.push_bind(Json(drones_assigned.clone()));
        }
        if let Some(routes_assigned) = &request.routes_assigned {
            query_builder.push(", routes_assigned = ");
            query_builder.push_bind(Json(routes_assigned.clone()));
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());

        let result = query_builder.build().execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Base {} not found", id)));
        }

        self.get_base(id).await
    }

    pub async fn delete_base(&self, id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM bases WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Base {} not found", id)));
        }

        Ok(())
    }
}
