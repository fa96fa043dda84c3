//! Resto Availability Server
//!
//! Resolves the effective opening state of every calendar date from the
//! restaurant's layered schedule configuration (periods, closures, day
//! overrides) and derives the reservable time slots, over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use engine::{AvailabilityEngine, ConfigSnapshot};
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
