//! Role service
//!
//! Deleting a role that users still reference is allowed; those users
//! then read back with a null `access_rights` until they are reassigned.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{new_id, CreateRoleRequest, Role, UpdateRoleRequest};

#[derive(Clone)]
pub struct RoleService {
    db_pool: SqlitePool,
}

impl RoleService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        let roles =
            sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.db_pool)
                .await?;

        Ok(roles)
    }

    pub async fn get_role(&self, id: &str) -> Result<Role, ApiError> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Role {} not found", id)))
    }

    pub async fn create_role(&self, request: CreateRoleRequest) -> Result<Role, ApiError> {
        let id = new_id("R_");
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO roles (id, name, description, permissions, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(Json(&request.permissions))
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_role(&id).await
    }

    /// Partial update: only the fields present in the request are written
    pub async fn update_role(
        &self,
        id: &str,
        request: UpdateRoleRequest,
    ) -> Result<Role, ApiError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE roles SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(name) = &request.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(description) = &request.description {
            query_builder.push(", description = ");
            query_builder.push_bind(description.clone());
        }
        if let Some(permissions) = &request.permissions {
            query_builder.push(", permissions = ");
            query_builder.push_bind(Json(permissions.clone()));
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());

        let result = query_builder.build().execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Role {} not found", id)));
        }

        self.get_role(id).await
    }

    pub async fn delete_role(&self, id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Role {} not found", id)));
        }

        Ok(())
    }
}
