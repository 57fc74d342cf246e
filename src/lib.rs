//! SkySweep Backend Library
//!
//! This library exports the core modules for the SkySweep backend server.

pub mod auth;
pub mod config;
pub mod db;
pub mod detect;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
