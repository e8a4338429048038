//! Analytics event ingestion and stats reads

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::analytics::{AnalyticEvent, RestaurantStats, TrackEventRequest},
    repository::Repository,
    services::redis::RedisService,
};

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
    redis: RedisService,
}

impl AnalyticsService {
    pub fn new(repository: Repository, redis: RedisService) -> Self {
        Self { repository, redis }
    }

    /// Enqueue one event, fire-and-forget.
    ///
    /// Success means the append is durable in the queue; callers never learn
    /// about aggregation outcomes.
    pub async fn track(&self, request: TrackEventRequest) -> AppResult<()> {
        if request.restaurant_id.trim().is_empty() {
            return Err(AppError::Validation("restaurantId is required".to_string()));
        }

        let event = AnalyticEvent {
            id: Uuid::new_v4(),
            restaurant_id: request.restaurant_id,
            timestamp: request.timestamp.unwrap_or_else(Utc::now),
            kind: request.kind,
        };

        let payload = serde_json::to_string(&event)
            .map_err(|e| AppError::Internal(format!("Failed to serialize event: {}", e)))?;
        self.redis.push_event(&payload).await
    }

    /// Aggregated stats for a restaurant, gated on ownership
    pub async fn stats_for_owner(
        &self,
        restaurant_id: &str,
        owner_id: &str,
    ) -> AppResult<RestaurantStats> {
        let restaurant = self.repository.restaurants.get_by_id(restaurant_id).await?;
        if restaurant.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "You do not own this restaurant".to_string(),
            ));
        }

        let fields = self.redis.stats_all(restaurant_id).await?;
        Ok(RestaurantStats::from_fields(&fields))
    }
}
