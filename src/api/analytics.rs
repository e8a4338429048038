//! Analytics endpoints: event tracking and owner stats

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::analytics::{RestaurantStats, TrackEventRequest},
};

use super::{AppJson, AuthenticatedOwner};

#[derive(Serialize, ToSchema)]
pub struct TrackResponse {
    pub message: String,
}

/// Record an analytics event from a public page.
///
/// Fire-and-forget: success means the event is queued; aggregation outcomes
/// are never reported to the caller.
#[utoipa::path(
    post,
    path = "/analytics/track",
    tag = "analytics",
    request_body = TrackEventRequest,
    responses(
        (status = 200, description = "Event queued", body = TrackResponse),
        (status = 400, description = "Missing or malformed event", body = crate::error::ErrorResponse)
    )
)]
pub async fn track_event(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<TrackEventRequest>,
) -> AppResult<Json<TrackResponse>> {
    state.services.analytics.track(request).await?;
    Ok(Json(TrackResponse {
        message: "Event tracked".to_string(),
    }))
}

/// Aggregated statistics for one of the caller's restaurants
#[utoipa::path(
    get,
    path = "/analytics/stats/{restaurantId}",
    tag = "analytics",
    params(
        ("restaurantId" = String, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Aggregated stats (zeroed if none recorded)", body = RestaurantStats),
        (status = 401, description = "Missing authentication", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller does not own this restaurant", body = crate::error::ErrorResponse),
        (status = 404, description = "Restaurant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedOwner(owner_id): AuthenticatedOwner,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<RestaurantStats>> {
    let stats = state
        .services
        .analytics
        .stats_for_owner(&restaurant_id, &owner_id)
        .await?;
    Ok(Json(stats))
}
