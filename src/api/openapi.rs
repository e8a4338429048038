//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, availability, health, reservations, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carta API",
        version = "0.1.0",
        description = "Reservation availability, booking and analytics for the Carta menu platform",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Reservations
        availability::get_availability,
        reservations::create_reservation,
        // Schedules
        schedules::update_schedule,
        // Analytics
        analytics::track_event,
        analytics::get_stats,
    ),
    components(
        schemas(
            // Schedules
            crate::models::schedule::DaySchedule,
            crate::models::schedule::WeekSchedule,
            crate::models::schedule::TimeSlot,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservationRequest,
            availability::AvailabilityResponse,
            // Analytics
            crate::models::analytics::TrackEventRequest,
            crate::models::analytics::EventKind,
            crate::models::analytics::PageType,
            crate::models::analytics::PageViewMetadata,
            crate::models::analytics::SocialClickMetadata,
            crate::models::analytics::RestaurantStats,
            crate::models::analytics::WeeklyTrend,
            crate::models::analytics::MonthlyComparison,
            analytics::TrackResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reservations", description = "Slot availability and booking"),
        (name = "schedules", description = "Opening-hours management"),
        (name = "analytics", description = "Event tracking and statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
