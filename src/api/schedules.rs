//! Opening-hours endpoint for restaurant owners

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::schedule::WeekSchedule};

use super::{AppJson, AuthenticatedOwner};

/// Replace a restaurant's weekly opening hours.
///
/// The schedule is validated day by day before it is stored; this is the only
/// write path into the blob the availability engine reads.
#[utoipa::path(
    put,
    path = "/restaurants/{id}/schedule",
    tag = "schedules",
    params(
        ("id" = String, Path, description = "Restaurant ID")
    ),
    request_body = WeekSchedule,
    responses(
        (status = 200, description = "Stored schedule", body = WeekSchedule),
        (status = 400, description = "Schedule failed validation", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing authentication", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller does not own this restaurant", body = crate::error::ErrorResponse),
        (status = 404, description = "Restaurant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedOwner(owner_id): AuthenticatedOwner,
    Path(restaurant_id): Path<String>,
    AppJson(schedule): AppJson<WeekSchedule>,
) -> AppResult<Json<WeekSchedule>> {
    let stored = state
        .services
        .schedules
        .update(&restaurant_id, &owner_id, schedule)
        .await?;
    Ok(Json(stored))
}
