//! Authentication service
//!
//! Credential login against stored users. Lookup accepts a username or an
//! email (emails are stored lowercase); every failure mode returns the same
//! opaque unauthorized error so the API does not reveal which check failed.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, LoginUser, User};

use super::jwt::generate_session_token;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: SqlitePool,
    jwt_secret: String,
    session_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(db_pool: SqlitePool, jwt_secret: String, session_ttl_seconds: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            session_ttl_seconds,
        }
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Inactive accounts and accounts outside their validity window are
    /// rejected the same way as a bad password.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let identifier = request.username_or_email.trim();

        let user: Option<User> =
            sqlx::query_as("SELECT * FROM users WHERE username = ? OR email = ?")
                .bind(identifier)
                .bind(identifier.to_lowercase())
                .fetch_optional(&self.db_pool)
                .await?;

        let user = user.ok_or_else(Self::invalid_credentials)?;

        let password_ok = bcrypt::verify(&request.password, &user.hashed_password)
            .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;
        if !password_ok {
            return Err(Self::invalid_credentials());
        }

        if !user.is_active {
            return Err(Self::invalid_credentials());
        }

        let today = Utc::now().date_naive();
        if let Some(start) = user.start_date {
            if today < start {
                return Err(Self::invalid_credentials());
            }
        }
        if let Some(end) = user.end_date {
            if today > end {
                return Err(Self::invalid_credentials());
            }
        }

        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(&user.id)
            .execute(&self.db_pool)
            .await?;

        let jti = Uuid::new_v4().to_string();
        let token =
            generate_session_token(&user, &jti, &self.jwt_secret, self.session_ttl_seconds)
                .map_err(|e| ApiError::InternalError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            ok: true,
            token,
            user: LoginUser {
                id: user.id,
                name: user.name,
            },
        })
    }

    /// Get JWT secret (for middleware access)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    fn invalid_credentials() -> ApiError {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }
}
