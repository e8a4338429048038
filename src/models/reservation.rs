//! Reservation model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Reservation lifecycle status.
///
/// Only `cancelled` frees a slot; `pending`, `confirmed` and `rejected` all
/// still occupy it. Transitions beyond the initial `pending` are performed by
/// the owner dashboard, outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
}

/// Reservation record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub restaurant_id: String,
    /// Reservation date (no timezone; the restaurant's local calendar day)
    pub date: NaiveDate,
    /// Slot start time (HH:MM, zero-padded, matches a generated slot boundary)
    pub time: String,
    pub number_of_guests: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking request from the public menu page
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, message = "restaurantId is required"))]
    pub restaurant_id: String,
    /// Reservation date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Slot start time (HH:MM)
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(range(min = 1, max = 20, message = "numberOfGuests must be between 1 and 20"))]
    pub number_of_guests: i32,
    #[validate(length(min = 1, message = "customerName is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customerEmail is required"), email(message = "Invalid email format"))]
    pub customer_email: String,
    #[validate(length(min = 1, message = "customerPhone is required"))]
    pub customer_phone: String,
    pub special_requests: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateReservationRequest {
        CreateReservationRequest {
            restaurant_id: "resto-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            time: "19:00".to_string(),
            number_of_guests: 2,
            customer_name: "Ada Jones".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "+33 6 12 34 56 78".to_string(),
            special_requests: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_guest_count_bounds() {
        let mut req = valid_request();
        req.number_of_guests = 0;
        assert!(req.validate().is_err());
        req.number_of_guests = 21;
        assert!(req.validate().is_err());
        req.number_of_guests = 20;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_required_fields_rejected() {
        let mut req = valid_request();
        req.customer_name = String::new();
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.customer_phone = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut req = valid_request();
        req.customer_email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
