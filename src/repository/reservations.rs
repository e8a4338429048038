//! Reservations repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservationRequest, Reservation, ReservationStatus},
};

/// Conflict message on the public wire, kept stable for the frontend
pub const SLOT_TAKEN_MESSAGE: &str = "This time slot is no longer available";

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Is there a non-cancelled reservation occupying this exact slot?
    pub async fn slot_taken(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> AppResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reservations
                WHERE restaurant_id = $1 AND date = $2 AND time = $3
                  AND status <> 'cancelled'
            )
            "#,
        )
        .bind(restaurant_id)
        .bind(date)
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    /// Insert a new pending reservation.
    ///
    /// The partial unique index on `(restaurant_id, date, time) WHERE status
    /// <> 'cancelled'` is the authoritative guard against double booking; a
    /// unique violation here means a concurrent request won the slot.
    pub async fn insert(
        &self,
        request: &CreateReservationRequest,
        time: &str,
    ) -> AppResult<Reservation> {
        let now = Utc::now();

        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (id, restaurant_id, date, time, number_of_guests,
                 customer_name, customer_email, customer_phone,
                 special_requests, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.restaurant_id)
        .bind(request.date)
        .bind(time)
        .bind(request.number_of_guests)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(&request.special_requests)
        .bind(ReservationStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(SLOT_TAKEN_MESSAGE.to_string())
            }
            _ => AppError::from(e),
        })
    }
}
