//! Business logic services for SkySweep

mod base;
mod detection;
mod drone;
mod image;
mod role;
mod route;
mod user;

pub use base::BaseService;
pub use detection::DetectionService;
pub use drone::DroneService;
pub use image::ImageService;
pub use role::RoleService;
pub use route::RouteService;
pub use user::UserService;

pub(crate) use user::hash_password;
