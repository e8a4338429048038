//! Redis-backed aggregator cycle tests

use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use carta_server::models::analytics::stats_fields;
use carta_server::services::{aggregator::AnalyticsAggregator, redis::RedisService};

async fn redis_service() -> RedisService {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    RedisService::new(&url).await.expect("Failed to connect to Redis")
}

fn event_payload(restaurant_id: &str, event_type: &str, metadata: serde_json::Value) -> String {
    json!({
        "id": Uuid::new_v4(),
        "restaurantId": restaurant_id,
        "timestamp": Utc::now(),
        "eventType": event_type,
        "metadata": metadata
    })
    .to_string()
}

#[tokio::test]
#[ignore] // Needs Redis; run with: cargo test -- --ignored
async fn test_cycle_drains_queue_and_folds_counters() {
    let redis = redis_service().await;
    let restaurant_id = format!("resto-{}", Uuid::new_v4());

    redis
        .push_event(&event_payload(&restaurant_id, "qr_scan", json!({})))
        .await
        .unwrap();
    redis
        .push_event(&event_payload(&restaurant_id, "qr_scan", json!({})))
        .await
        .unwrap();
    redis
        .push_event(&event_payload(&restaurant_id, "page_view", json!({"pageType": "menu"})))
        .await
        .unwrap();
    redis
        .push_event(&event_payload(&restaurant_id, "page_view", json!({"pageType": "menu"})))
        .await
        .unwrap();

    let aggregator = AnalyticsAggregator::new(redis.clone(), Duration::from_secs(60), 100);

    // Other tests (or a running server) may share the queue; cycle until our
    // events have been drained
    for _ in 0..10 {
        aggregator.run_cycle().await.expect("cycle failed");
        if redis.peek_events(1).await.unwrap().is_empty() {
            break;
        }
    }

    let fields = redis.stats_all(&restaurant_id).await.unwrap();
    assert_eq!(fields.get(stats_fields::QR_SCANS).map(String::as_str), Some("2"));
    assert_eq!(fields.get(stats_fields::MENU_VIEWS).map(String::as_str), Some("2"));
    assert!(fields.get(stats_fields::TOTAL_VIEWS).is_none());
    // both page views land in the current month and its week bucket
    assert_eq!(fields.get(stats_fields::MONTH_CURRENT).map(String::as_str), Some("2"));
    let marker = Utc::now().format("%Y-%m").to_string();
    assert_eq!(
        fields.get(stats_fields::MONTH_MARKER).map(String::as_str),
        Some(marker.as_str())
    );
    let week_fields = fields.keys().filter(|f| f.starts_with("week:")).count();
    assert_eq!(week_fields, 1);
}

#[tokio::test]
#[ignore]
async fn test_malformed_entries_are_dropped_not_fatal() {
    let redis = redis_service().await;
    let restaurant_id = format!("resto-{}", Uuid::new_v4());

    redis.push_event("not json at all").await.unwrap();
    redis
        .push_event(&event_payload(&restaurant_id, "qr_scan", json!({})))
        .await
        .unwrap();

    let aggregator = AnalyticsAggregator::new(redis.clone(), Duration::from_secs(60), 100);
    for _ in 0..10 {
        aggregator.run_cycle().await.expect("cycle failed");
        if redis.peek_events(1).await.unwrap().is_empty() {
            break;
        }
    }

    let fields = redis.stats_all(&restaurant_id).await.unwrap();
    assert_eq!(fields.get(stats_fields::QR_SCANS).map(String::as_str), Some("1"));
}
