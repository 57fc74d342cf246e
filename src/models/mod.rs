//! Data models for the SkySweep backend
//!
//! Each entity keeps the document shape of the operations platform: flat
//! columns for scalar fields, JSON columns for nested sub-records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod base;
pub mod detection;
pub mod drone;
pub mod image;
pub mod role;
pub mod route;
pub mod user;

pub use base::*;
pub use detection::*;
pub use drone::*;
pub use image::*;
pub use role::*;
pub use route::*;
pub use user::*;

/// Simple confirmation payload (deletes and similar)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Generate a prefixed record identifier, e.g. `img_a1b2c3d4`.
///
/// The token is the first 8 hex characters of a v4 UUID.
pub fn new_id(prefix: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &token[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_shape() {
        let id = new_id("img_");
        assert!(id.starts_with("img_"));
        assert_eq!(id.len(), "img_".len() + 8);
        assert!(id["img_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_new_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id("U_")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
