//! Redis service: analytics event queue and per-restaurant stats hashes

use std::collections::HashMap;

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

/// FIFO queue of serialized analytics events
const EVENTS_QUEUE_KEY: &str = "analytics:events";

fn stats_key(restaurant_id: &str) -> String {
    format!("analytics:stats:{}", restaurant_id)
}

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service and verify connectivity
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// Connectivity probe for the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    // -- event queue --------------------------------------------------------

    /// Append a serialized event to the queue tail
    pub async fn push_event(&self, payload: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.rpush::<_, _, ()>(EVENTS_QUEUE_KEY, payload).await?;
        Ok(())
    }

    /// Read up to `count` entries from the queue head without removing them
    pub async fn peek_events(&self, count: usize) -> AppResult<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;
        let entries: Vec<String> = conn
            .lrange(EVENTS_QUEUE_KEY, 0, count as isize - 1)
            .await?;
        Ok(entries)
    }

    /// Remove exactly `count` entries from the queue head, preserving FIFO
    /// order for anything appended since the peek
    pub async fn trim_events(&self, count: usize) -> AppResult<()> {
        if count == 0 {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.ltrim::<_, ()>(EVENTS_QUEUE_KEY, count as isize, -1)
            .await?;
        Ok(())
    }

    // -- stats hashes -------------------------------------------------------

    /// Atomically add `delta` to a counter field of a restaurant's stats hash
    pub async fn stats_incr(&self, restaurant_id: &str, field: &str, delta: i64) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.hincr::<_, _, _, ()>(stats_key(restaurant_id), field, delta)
            .await?;
        Ok(())
    }

    pub async fn stats_get(&self, restaurant_id: &str, field: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.hget(stats_key(restaurant_id), field).await?;
        Ok(value)
    }

    pub async fn stats_set(&self, restaurant_id: &str, field: &str, value: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.hset::<_, _, _, ()>(stats_key(restaurant_id), field, value)
            .await?;
        Ok(())
    }

    pub async fn stats_del_fields(&self, restaurant_id: &str, fields: &[String]) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.hdel::<_, _, ()>(stats_key(restaurant_id), fields).await?;
        Ok(())
    }

    /// Full stats hash for a restaurant; empty map when nothing was recorded
    pub async fn stats_all(&self, restaurant_id: &str) -> AppResult<HashMap<String, String>> {
        let mut conn = self.connection().await?;
        let fields: HashMap<String, String> = conn.hgetall(stats_key(restaurant_id)).await?;
        Ok(fields)
    }
}
