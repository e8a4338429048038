//! Analytics event and statistics models

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of weekly-trend entries retained per restaurant
pub const WEEKLY_TREND_LIMIT: usize = 4;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Which public page a view landed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Profile,
    Menu,
    /// Any page this core does not count separately
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageViewMetadata {
    #[serde(default)]
    pub page_type: PageType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialClickMetadata {
    /// Social network the click went to. Required: a click without a platform
    /// cannot be attributed and is rejected at the boundary.
    pub platform: String,
}

/// Analytics event discriminant. The event type determines which metadata
/// fields are legal, so malformed payloads fail at the boundary instead of
/// silently folding into nothing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "eventType", rename_all = "snake_case")]
pub enum EventKind {
    PageView {
        #[serde(default)]
        metadata: PageViewMetadata,
    },
    QrScan,
    SocialMediaClick { metadata: SocialClickMetadata },
}

/// One tracked user action, queue-only: consumed exactly once by the
/// aggregator, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticEvent {
    pub id: Uuid,
    pub restaurant_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Tracking request from a public page
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventRequest {
    pub restaurant_id: String,
    /// Client-side event time; server "now" when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: EventKind,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Field names of the per-restaurant stats hash in Redis. Counters are plain
/// integers mutated with HINCRBY; `month` is a `YYYY-MM` rollover marker.
pub mod stats_fields {
    pub const TOTAL_VIEWS: &str = "total_views";
    pub const MENU_VIEWS: &str = "menu_views";
    pub const QR_SCANS: &str = "qr_scans";
    pub const MONTH_CURRENT: &str = "month_current";
    pub const MONTH_PREVIOUS: &str = "month_previous";
    pub const MONTH_MARKER: &str = "month";

    pub fn social(platform: &str) -> String {
        format!("social:{}", platform)
    }

    pub fn hour(hour: u32) -> String {
        format!("hour:{}", hour)
    }

    pub fn week(week: u32) -> String {
        format!("week:{}", week)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// ISO week number
    pub week: u32,
    pub views: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub current_month: u64,
    pub previous_month: u64,
    /// `(current − previous) / previous × 100`; 0 when previous is 0
    pub percentage_change: f64,
}

/// Aggregated per-restaurant statistics, assembled at read time from the
/// stats hash. Zeroed when nothing has been recorded yet.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStats {
    pub total_views: u64,
    pub menu_views: u64,
    pub qr_scans: u64,
    pub social_clicks: BTreeMap<String, u64>,
    /// Count per hour of day, keyed "0".."23"
    pub hourly_distribution: BTreeMap<String, u64>,
    /// The 4 most recent week buckets, sorted descending by week number
    pub weekly_trends: Vec<WeeklyTrend>,
    pub monthly_comparison: MonthlyComparison,
}

impl RestaurantStats {
    /// Assemble the response shape from the raw stats hash
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let counter = |name: &str| -> u64 {
            fields.get(name).and_then(|v| v.parse().ok()).unwrap_or(0)
        };

        let mut social_clicks = BTreeMap::new();
        let mut weekly = Vec::new();
        for (field, value) in fields {
            let count: u64 = match value.parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if let Some(platform) = field.strip_prefix("social:") {
                social_clicks.insert(platform.to_string(), count);
            } else if let Some(week) = field.strip_prefix("week:") {
                if let Ok(week) = week.parse::<u32>() {
                    weekly.push(WeeklyTrend { week, views: count });
                }
            }
        }

        // Most recent weeks first; the aggregator prunes the hash to the same
        // bound, this re-truncation covers a prune that has not landed yet.
        weekly.sort_by(|a, b| b.week.cmp(&a.week));
        weekly.truncate(WEEKLY_TREND_LIMIT);

        let mut hourly_distribution = BTreeMap::new();
        for hour in 0..24u32 {
            hourly_distribution.insert(hour.to_string(), counter(&stats_fields::hour(hour)));
        }

        let current_month = counter(stats_fields::MONTH_CURRENT);
        let previous_month = counter(stats_fields::MONTH_PREVIOUS);
        let percentage_change = if previous_month == 0 {
            0.0
        } else {
            (current_month as f64 - previous_month as f64) / previous_month as f64 * 100.0
        };

        Self {
            total_views: counter(stats_fields::TOTAL_VIEWS),
            menu_views: counter(stats_fields::MENU_VIEWS),
            qr_scans: counter(stats_fields::QR_SCANS),
            social_clicks,
            hourly_distribution,
            weekly_trends: weekly,
            monthly_comparison: MonthlyComparison {
                current_month,
                previous_month,
                percentage_change,
            },
        }
    }

    /// Stats for a restaurant with no recorded activity
    pub fn zeroed() -> Self {
        Self::from_fields(&HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_request_page_view() {
        let req: TrackEventRequest = serde_json::from_str(
            r#"{"restaurantId":"r1","eventType":"page_view","metadata":{"pageType":"menu"}}"#,
        )
        .unwrap();
        assert_eq!(req.restaurant_id, "r1");
        match req.kind {
            EventKind::PageView { metadata } => assert_eq!(metadata.page_type, PageType::Menu),
            _ => panic!("expected page_view"),
        }
    }

    #[test]
    fn test_page_view_without_metadata_tolerated() {
        let req: TrackEventRequest =
            serde_json::from_str(r#"{"restaurantId":"r1","eventType":"page_view"}"#).unwrap();
        match req.kind {
            EventKind::PageView { metadata } => assert_eq!(metadata.page_type, PageType::Other),
            _ => panic!("expected page_view"),
        }
    }

    #[test]
    fn test_unknown_page_type_falls_back() {
        let req: TrackEventRequest = serde_json::from_str(
            r#"{"restaurantId":"r1","eventType":"page_view","metadata":{"pageType":"checkout"}}"#,
        )
        .unwrap();
        match req.kind {
            EventKind::PageView { metadata } => assert_eq!(metadata.page_type, PageType::Other),
            _ => panic!("expected page_view"),
        }
    }

    #[test]
    fn test_social_click_requires_platform() {
        let err = serde_json::from_str::<TrackEventRequest>(
            r#"{"restaurantId":"r1","eventType":"social_media_click","metadata":{}}"#,
        );
        assert!(err.is_err());

        let ok: TrackEventRequest = serde_json::from_str(
            r#"{"restaurantId":"r1","eventType":"social_media_click","metadata":{"platform":"instagram"}}"#,
        )
        .unwrap();
        match ok.kind {
            EventKind::SocialMediaClick { metadata } => assert_eq!(metadata.platform, "instagram"),
            _ => panic!("expected social_media_click"),
        }
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let err = serde_json::from_str::<TrackEventRequest>(
            r#"{"restaurantId":"r1","eventType":"mouse_move"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_event_queue_round_trip() {
        let event = AnalyticEvent {
            id: Uuid::new_v4(),
            restaurant_id: "r1".to_string(),
            timestamp: Utc::now(),
            kind: EventKind::QrScan,
        };
        let raw = serde_json::to_string(&event).unwrap();
        assert!(raw.contains("\"eventType\":\"qr_scan\""));
        let back: AnalyticEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.restaurant_id, "r1");
    }

    #[test]
    fn test_zeroed_stats() {
        let stats = RestaurantStats::zeroed();
        assert_eq!(stats.total_views, 0);
        assert_eq!(stats.qr_scans, 0);
        assert!(stats.social_clicks.is_empty());
        assert!(stats.weekly_trends.is_empty());
        assert_eq!(stats.hourly_distribution.len(), 24);
        assert_eq!(stats.monthly_comparison.percentage_change, 0.0);
    }

    #[test]
    fn test_percentage_change_guard() {
        // previousMonth == 0 never divides
        let mut fields = HashMap::new();
        fields.insert(stats_fields::MONTH_CURRENT.to_string(), "42".to_string());
        let stats = RestaurantStats::from_fields(&fields);
        assert_eq!(stats.monthly_comparison.current_month, 42);
        assert_eq!(stats.monthly_comparison.percentage_change, 0.0);

        fields.insert(stats_fields::MONTH_PREVIOUS.to_string(), "21".to_string());
        let stats = RestaurantStats::from_fields(&fields);
        assert_eq!(stats.monthly_comparison.percentage_change, 100.0);
    }

    #[test]
    fn test_weekly_trend_bound() {
        let mut fields = HashMap::new();
        for week in 10..16u32 {
            fields.insert(stats_fields::week(week), week.to_string());
        }
        let stats = RestaurantStats::from_fields(&fields);
        assert_eq!(stats.weekly_trends.len(), WEEKLY_TREND_LIMIT);
        let weeks: Vec<u32> = stats.weekly_trends.iter().map(|t| t.week).collect();
        assert_eq!(weeks, vec![15, 14, 13, 12]);
    }

    #[test]
    fn test_social_clicks_assembled() {
        let mut fields = HashMap::new();
        fields.insert(stats_fields::social("instagram"), "3".to_string());
        fields.insert(stats_fields::social("facebook"), "1".to_string());
        let stats = RestaurantStats::from_fields(&fields);
        assert_eq!(stats.social_clicks.get("instagram"), Some(&3));
        assert_eq!(stats.social_clicks.get("facebook"), Some(&1));
    }
}
