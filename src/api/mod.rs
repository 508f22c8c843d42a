//! API handlers for the maintenance tracker REST endpoints

pub mod analytics;
pub mod backup;
pub mod equipment;
pub mod health;
pub mod logs;
pub mod openapi;
