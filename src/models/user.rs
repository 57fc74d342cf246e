//! User models and account payloads
//!
//! The stored record references a role by id; the role *name* is what the
//! API accepts and returns as `access_rights`. Names are resolved to ids
//! before any write and back to names at read time, so the id stays the
//! single source of truth.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored user record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub role_id: String,
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned by the API, with the role name resolved at read time.
///
/// `access_rights` is null when the referenced role no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub role_id: String,
    pub access_rights: Option<String>,
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    /// Role name, resolved to a role id before the user is written
    #[validate(length(min = 1))]
    pub access_rights: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Partial update; absent and null fields are both left unchanged
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub access_rights: Option<String>,

    pub is_active: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// A new password re-hashes the credential; an empty string is rejected
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username_or_email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
    pub user: LoginUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_rejects_empty_password() {
        let request = CreateUserRequest {
            username: "jdoe".to_string(),
            name: "J. Doe".to_string(),
            email: None,
            access_rights: "Operator".to_string(),
            is_active: true,
            start_date: None,
            end_date: None,
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_user_request_rejects_empty_password() {
        let request = UpdateUserRequest {
            password: Some(String::new()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_user_request_allows_absent_password() {
        let request = UpdateUserRequest {
            name: Some("New Name".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let request = CreateUserRequest {
            username: "jdoe".to_string(),
            name: "J. Doe".to_string(),
            email: Some("not-an-email".to_string()),
            access_rights: "Operator".to_string(),
            is_active: true,
            start_date: None,
            end_date: None,
            password: "Secret123".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
