//! Opening-hours persistence for restaurant owners
//!
//! The one write path into `restaurants.opening_hours`; everything the
//! availability engine later reads went through this validation.

use crate::{
    error::{AppError, AppResult},
    models::schedule::{validate_schedule, WeekSchedule},
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a restaurant's weekly schedule
    pub async fn update(
        &self,
        restaurant_id: &str,
        owner_id: &str,
        schedule: WeekSchedule,
    ) -> AppResult<WeekSchedule> {
        let restaurant = self.repository.restaurants.get_by_id(restaurant_id).await?;
        if restaurant.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "You do not own this restaurant".to_string(),
            ));
        }

        let issues = validate_schedule(&schedule);
        if !issues.is_empty() {
            let detail = issues
                .iter()
                .map(|(day, issue)| format!("{}: {}", day, issue))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::Validation(format!("Invalid schedule ({})", detail)));
        }

        let raw = serde_json::to_string(&schedule)
            .map_err(|e| AppError::Internal(format!("Failed to serialize schedule: {}", e)))?;
        self.repository
            .restaurants
            .update_opening_hours(restaurant_id, &raw)
            .await?;

        Ok(schedule)
    }
}
