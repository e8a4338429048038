//! Reservation booking service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        reservation::{CreateReservationRequest, Reservation},
        schedule,
    },
    repository::{reservations::SLOT_TAKEN_MESSAGE, Repository},
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and book a slot, creating a `pending` reservation.
    ///
    /// The pre-insert `slot_taken` probe gives the common case a clean error;
    /// the partial unique index catches the race where two requests pass the
    /// probe for the same slot.
    pub async fn create(&self, request: CreateReservationRequest) -> AppResult<Reservation> {
        request
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        self.repository
            .restaurants
            .get_by_id(&request.restaurant_id)
            .await?;

        let time = schedule::normalize_slot_time(&request.time).ok_or_else(|| {
            AppError::Validation(format!("Invalid reservation time: {}", request.time))
        })?;

        if self
            .repository
            .reservations
            .slot_taken(&request.restaurant_id, request.date, &time)
            .await?
        {
            return Err(AppError::Conflict(SLOT_TAKEN_MESSAGE.to_string()));
        }

        self.repository.reservations.insert(&request, &time).await
    }
}

/// First human-readable message out of a validator error set
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
