//! Availability API endpoints (effective days, reservable slots)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{EffectiveDay, WeekOverview},
    AppState,
};

use super::{parse_date, parse_time};

/// Inclusive date range (YYYY-MM-DD)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DateRangeQuery {
    /// First date (YYYY-MM-DD)
    pub from: String,
    /// Last date, included (YYYY-MM-DD)
    pub to: String,
}

/// Slot listing parameters
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
pub struct SlotsQuery {
    /// Minutes between two slots (defaults to the server setting)
    #[validate(range(min = 1, max = 720, message = "granularity must be between 1 and 720 minutes"))]
    pub granularity: Option<u32>,
}

/// Slot listing parameters over a date range
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
pub struct SlotsRangeQuery {
    /// First date (YYYY-MM-DD)
    pub from: String,
    /// Last date, included (YYYY-MM-DD)
    pub to: String,
    /// Minutes between two slots (defaults to the server setting)
    #[validate(range(min = 1, max = 720, message = "granularity must be between 1 and 720 minutes"))]
    pub granularity: Option<u32>,
}

/// Slot check parameters
#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
pub struct SlotCheckQuery {
    /// Requested start time (HH:MM)
    pub time: String,
    #[validate(range(min = 1, max = 720, message = "granularity must be between 1 and 720 minutes"))]
    pub granularity: Option<u32>,
}

/// Reservable slots of one day
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotsResponse {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub granularity_minutes: u32,
    #[schema(value_type = Vec<String>, example = json!(["12:00:00", "12:15:00"]))]
    pub slots: Vec<NaiveTime>,
}

/// Reservable slots keyed by date
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotsRangeResponse {
    #[schema(value_type = String, format = Date)]
    pub from: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub to: NaiveDate,
    pub granularity_minutes: u32,
    /// `{"2025-07-15": ["12:00:00", ...], ...}` in ascending date order
    #[schema(value_type = Object)]
    pub days: IndexMap<NaiveDate, Vec<NaiveTime>>,
}

/// Open dates of a range
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpenDaysResponse {
    #[schema(value_type = String, format = Date)]
    pub from: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub to: NaiveDate,
    #[schema(value_type = Vec<String>)]
    pub open_days: Vec<NaiveDate>,
}

/// Result of a slot check
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotCheckResponse {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub time: NaiveTime,
    pub granularity_minutes: u32,
    pub reservable: bool,
}

fn validate<T: Validate>(query: &T) -> AppResult<()> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

// ---- Effective days ----

/// Effective availability of one date
#[utoipa::path(
    get,
    path = "/availability/days/{date}",
    tag = "availability",
    params(("date" = String, Path, description = "Date (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "Effective day", body = EffectiveDay),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse),
        (status = 422, description = "Configuration must be fixed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_effective_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<EffectiveDay>> {
    let date = parse_date(&date, "date")?;
    let day = state.services.availability.effective_day(date).await?;
    Ok(Json(day))
}

/// Effective availability of every date of a range
#[utoipa::path(
    get,
    path = "/availability/days",
    tag = "availability",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Effective days, ascending", body = Vec<EffectiveDay>),
        (status = 400, description = "Invalid or too large range", body = crate::error::ErrorResponse),
        (status = 422, description = "Configuration must be fixed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_effective_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<EffectiveDay>>> {
    let from = parse_date(&query.from, "from")?;
    let to = parse_date(&query.to, "to")?;
    let days = state.services.availability.effective_range(from, to).await?;
    Ok(Json(days))
}

/// Open dates of a range (used to suppress shifts on closed days)
#[utoipa::path(
    get,
    path = "/availability/open-days",
    tag = "availability",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Open dates", body = OpenDaysResponse),
        (status = 400, description = "Invalid or too large range", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_open_days(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<OpenDaysResponse>> {
    let from = parse_date(&query.from, "from")?;
    let to = parse_date(&query.to, "to")?;
    let open_days = state.services.availability.open_days(from, to).await?;
    Ok(Json(OpenDaysResponse { from, to, open_days }))
}

/// Effective days of an ISO week
#[utoipa::path(
    get,
    path = "/availability/weeks/{iso_year}/{week}",
    tag = "availability",
    params(
        ("iso_year" = i32, Path, description = "ISO week-numbering year"),
        ("week" = u32, Path, description = "ISO week number (1-53)")
    ),
    responses(
        (status = 200, description = "Week overview", body = WeekOverview),
        (status = 400, description = "No such week", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_week_overview(
    State(state): State<AppState>,
    Path((iso_year, week)): Path<(String, String)>,
) -> AppResult<Json<WeekOverview>> {
    let iso_year: i32 = iso_year
        .parse()
        .map_err(|_| AppError::Validation("Invalid iso_year (use a year number)".to_string()))?;
    let week: u32 = week
        .parse()
        .map_err(|_| AppError::Validation("Invalid week (use 1-53)".to_string()))?;
    let overview = state.services.availability.week_overview(iso_year, week).await?;
    Ok(Json(overview))
}

// ---- Slots ----

/// Reservable slots of one date
#[utoipa::path(
    get,
    path = "/availability/slots/{date}",
    tag = "availability",
    params(("date" = String, Path, description = "Date (YYYY-MM-DD)"), SlotsQuery),
    responses(
        (status = 200, description = "Reservable slots", body = SlotsResponse),
        (status = 400, description = "Invalid parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservable_slots(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<SlotsResponse>> {
    validate(&query)?;
    let date = parse_date(&date, "date")?;
    let service = &state.services.availability;
    let granularity_minutes = query
        .granularity
        .unwrap_or(state.config.availability.default_granularity_minutes);

    let slots = service.reservable_slots(date, granularity_minutes).await?;
    Ok(Json(SlotsResponse {
        date,
        granularity_minutes,
        slots,
    }))
}

/// Reservable slots of every date of a range
#[utoipa::path(
    get,
    path = "/availability/slots",
    tag = "availability",
    params(SlotsRangeQuery),
    responses(
        (status = 200, description = "Reservable slots by date", body = SlotsRangeResponse),
        (status = 400, description = "Invalid parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservable_slots_range(
    State(state): State<AppState>,
    Query(query): Query<SlotsRangeQuery>,
) -> AppResult<Json<SlotsRangeResponse>> {
    validate(&query)?;
    let from = parse_date(&query.from, "from")?;
    let to = parse_date(&query.to, "to")?;
    let service = &state.services.availability;
    let granularity_minutes = query
        .granularity
        .unwrap_or(state.config.availability.default_granularity_minutes);

    let days = service
        .reservable_slots_range(from, to, granularity_minutes)
        .await?;
    Ok(Json(SlotsRangeResponse {
        from,
        to,
        granularity_minutes,
        days,
    }))
}

/// Check a requested time against the reservable slots (waitlist conversion)
#[utoipa::path(
    get,
    path = "/availability/slots/{date}/check",
    tag = "availability",
    params(("date" = String, Path, description = "Date (YYYY-MM-DD)"), SlotCheckQuery),
    responses(
        (status = 200, description = "Check result", body = SlotCheckResponse),
        (status = 400, description = "Invalid parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_slot(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<SlotCheckQuery>,
) -> AppResult<Json<SlotCheckResponse>> {
    validate(&query)?;
    let date = parse_date(&date, "date")?;
    let time = parse_time(&query.time, "time")?;
    let service = &state.services.availability;
    let granularity_minutes = query
        .granularity
        .unwrap_or(state.config.availability.default_granularity_minutes);

    let reservable = service.check_slot(date, time, granularity_minutes).await?;
    Ok(Json(SlotCheckResponse {
        date,
        time,
        granularity_minutes,
        reservable,
    }))
}
