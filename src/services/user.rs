//! User service
//!
//! Role names arriving as `access_rights` are resolved to role ids before
//! anything is written, so an unknown role fails the whole operation and
//! persists nothing.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{new_id, CreateUserRequest, Role, UpdateUserRequest, UserResponse};

#[derive(Clone)]
pub struct UserService {
    db_pool: SqlitePool,
}

impl UserService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        let users = sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT u.id, u.username, u.name, u.email, u.role_id,
                   r.name AS access_rights, u.is_active, u.start_date, u.end_date,
                   u.last_login, u.created_at, u.updated_at
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            ORDER BY u.created_at ASC, u.id ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(users)
    }

    pub async fn get_user(&self, id: &str) -> Result<UserResponse, ApiError> {
        sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT u.id, u.username, u.name, u.email, u.role_id,
                   r.name AS access_rights, u.is_active, u.start_date, u.end_date,
                   u.last_login, u.created_at, u.updated_at
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, ApiError> {
        let role = self.resolve_role(&request.access_rights).await?;

        let hashed_password = hash_password(&request.password)?;
        let id = new_id("U_");
        let now = Utc::now();
        let email = request.email.map(|e| e.to_lowercase());

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, name, email, role_id, is_active, start_date, end_date,
                hashed_password, last_login, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.username)
        .bind(&request.name)
        .bind(&email)
        .bind(&role.id)
        .bind(request.is_active)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&hashed_password)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        self.get_user(&id).await
    }

    /// Partial update: only the fields present in the request are written
    pub async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        // Resolve the role and hash the password before touching the row
        let role_id = match &request.access_rights {
            Some(name) => Some(self.resolve_role(name).await?.id),
            None => None,
        };
        let hashed_password = match &request.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE users SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(username) = &request.username {
            query_builder.push(", username = ");
            query_builder.push_bind(username.clone());
        }
        if let Some(name) = &request.name {
            query_builder.push(", name = ");
            query_builder.push_bind(name.clone());
        }
        if let Some(email) = &request.email {
            query_builder.push(", email = ");
            query_builder.push_bind(email.to_lowercase());
        }
        if let Some(role_id) = &role_id {
            query_builder.push(", role_id = ");
            query_builder.push_bind(role_id.clone());
        }
        if let Some(is_active) = request.is_active {
            query_builder.push(", is_active = ");
            query_builder.push_bind(is_active);
        }
        if let Some(start_date) = request.start_date {
            query_builder.push(", start_date = ");
            query_builder.push_bind(start_date);
        }
        if let Some(end_date) = request.end_date {
            query_builder.push(", end_date = ");
            query_builder.push_bind(end_date);
        }
        if let Some(hash) = &hashed_password {
            query_builder.push(", hashed_password = ");
            query_builder.push_bind(hash.clone());
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());

        let result = query_builder.build().execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("User {} not found", id)));
        }

        self.get_user(id).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    async fn resolve_role(&self, name: &str) -> Result<Role, ApiError> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::ValidationError(format!("Unknown role: {}", name)))
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))
}
