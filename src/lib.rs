//! Vacuum Pump Maintenance Tracker
//!
//! A REST JSON API server for tracking weekly vacuum-pump maintenance
//! checks across a fleet of lab and production equipment.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
