//! API handlers for the SkySweep backend

pub mod ai;
pub mod analysis;
pub mod auth;
pub mod bases;
pub mod drones;
pub mod roles;
pub mod users;

// Re-export AuthenticatedUser from middleware for handler use
pub use crate::middleware::AuthenticatedUser;
