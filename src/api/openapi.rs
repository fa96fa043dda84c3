//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resto Availability API",
        version = "1.0.0",
        description = "Effective opening days and reservable slots of the restaurant"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Effective days
        availability::get_effective_day,
        availability::get_effective_range,
        availability::get_open_days,
        availability::get_week_overview,
        // Slots
        availability::get_reservable_slots,
        availability::get_reservable_slots_range,
        availability::check_slot,
    ),
    components(
        schemas(
            // Availability
            crate::models::EffectiveDay,
            crate::models::BlockedWindow,
            crate::models::Block,
            crate::models::DaySource,
            crate::models::WeekOverview,
            crate::calendar::Weekday,
            availability::DateRangeQuery,
            availability::SlotsQuery,
            availability::SlotsRangeQuery,
            availability::SlotCheckQuery,
            availability::SlotsResponse,
            availability::SlotsRangeResponse,
            availability::OpenDaysResponse,
            availability::SlotCheckResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Effective days and reservable slots")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
