//! Reservation booking endpoint

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::reservation::{CreateReservationRequest, Reservation},
};

use super::AppJson;

/// Book a reservation slot.
///
/// The reservation is created in `pending` status; confirmation or rejection
/// happens from the owner dashboard. A slot conflict is reported as 400 to
/// keep the public wire format unchanged.
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid request or slot already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Restaurant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.create(request).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}
