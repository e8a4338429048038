//! Slot availability endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::schedule::TimeSlot,
};

/// Query parameters for the availability lookup
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Restaurant ID
    pub restaurant_id: Option<String>,
    /// Date to check (YYYY-MM-DD)
    pub date: Option<String>,
    /// UI language; accepted and ignored by this core
    #[allow(dead_code)]
    pub language: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub time_slots: Vec<TimeSlot>,
}

/// List candidate reservation slots for a restaurant and date.
///
/// A closed day or a restaurant without usable opening hours yields an empty
/// slot list, not an error.
#[utoipa::path(
    get,
    path = "/availability",
    tag = "reservations",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Candidate slots with availability", body = AvailabilityResponse),
        (status = 400, description = "Missing or malformed parameters", body = crate::error::ErrorResponse),
        (status = 404, description = "Restaurant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let restaurant_id = query
        .restaurant_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("restaurantId is required".to_string()))?;
    let date = query
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::Validation("date is required".to_string()))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", date)))?;

    let time_slots = state.services.availability.for_date(restaurant_id, date).await?;
    Ok(Json(AvailabilityResponse { time_slots }))
}
