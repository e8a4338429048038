//! Restaurants repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::restaurant::Restaurant,
};

#[derive(Clone)]
pub struct RestaurantsRepository {
    pool: Pool<Postgres>,
}

impl RestaurantsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get restaurant by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Restaurant> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant with id {} not found", id)))
    }

    /// Store a new (already validated) opening-hours blob
    pub async fn update_opening_hours(&self, id: &str, opening_hours: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE restaurants SET opening_hours = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(opening_hours)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Restaurant with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
