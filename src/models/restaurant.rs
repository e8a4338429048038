//! Restaurant read model
//!
//! Restaurant CRUD belongs to the platform's document glue; this core only
//! reads the owner and the `opening_hours` blob.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Restaurant record as read from the database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    /// Identity-provider subject of the owning account
    pub owner_id: String,
    pub name: String,
    /// JSON-serialized [`WeekSchedule`](super::schedule::WeekSchedule);
    /// any malformed value is treated as absent
    pub opening_hours: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
