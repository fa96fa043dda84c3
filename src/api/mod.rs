//! API handlers for the availability REST endpoints

pub mod availability;
pub mod health;
pub mod openapi;

use axum::{routing::get, Router};
use chrono::{NaiveDate, NaiveTime};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Effective days
        .route("/availability/days", get(availability::get_effective_range))
        .route("/availability/days/:date", get(availability::get_effective_day))
        .route("/availability/open-days", get(availability::get_open_days))
        .route("/availability/weeks/:iso_year/:week", get(availability::get_week_overview))
        // Reservable slots
        .route("/availability/slots", get(availability::get_reservable_slots_range))
        .route("/availability/slots/:date", get(availability::get_reservable_slots))
        .route("/availability/slots/:date/check", get(availability::check_slot))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

/// Parse a YYYY-MM-DD request value
pub(crate) fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}

/// Parse a HH:MM (or HH:MM:SS) request value
pub(crate) fn parse_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}
