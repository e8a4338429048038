//! Data models for the Carta server

pub mod analytics;
pub mod reservation;
pub mod restaurant;
pub mod schedule;

// Re-export commonly used types
pub use analytics::{AnalyticEvent, EventKind, RestaurantStats, TrackEventRequest};
pub use reservation::{CreateReservationRequest, Reservation, ReservationStatus};
pub use restaurant::Restaurant;
pub use schedule::{DaySchedule, TimeSlot, WeekSchedule};
