//! Business logic services

pub mod aggregator;
pub mod analytics;
pub mod availability;
pub mod redis;
pub mod reservations;
pub mod schedules;

use crate::{config::ReservationsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub reservations: reservations::ReservationsService,
    pub schedules: schedules::SchedulesService,
    pub analytics: analytics::AnalyticsService,
    pub redis: redis::RedisService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        reservations_config: ReservationsConfig,
        redis_service: redis::RedisService,
    ) -> Self {
        Self {
            availability: availability::AvailabilityService::new(
                repository.clone(),
                reservations_config.slot_interval_minutes,
            ),
            reservations: reservations::ReservationsService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone()),
            analytics: analytics::AnalyticsService::new(repository.clone(), redis_service.clone()),
            redis: redis_service,
            repository,
        }
    }
}
