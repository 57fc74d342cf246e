//! Authentication module for SkySweep
//!
//! Credential-based login with expiring JWT session tokens.
//! - Username or email login with bcrypt-hashed passwords
//! - HS256 session tokens, TTL from configuration

mod jwt;
mod service;

pub use jwt::{generate_session_token, verify_token, Claims, JwtError};
pub use service::AuthService;
