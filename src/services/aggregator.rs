//! Periodic analytics aggregator
//!
//! A singleton background task that drains the event queue in bounded batches
//! and folds each batch into per-restaurant stats hashes. Cycles run inline
//! in the task, so two cycles can never overlap. Analytics is best-effort:
//! every failure here is logged and retried next tick, never surfaced to a
//! request path.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{
    error::AppResult,
    models::analytics::{stats_fields, AnalyticEvent, EventKind, PageType, WEEKLY_TREND_LIMIT},
    services::redis::RedisService,
};

/// Net effect of one batch of events on one restaurant's stats
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatsDelta {
    pub total_views: i64,
    pub menu_views: i64,
    pub qr_scans: i64,
    /// Page views that fell in the aggregator's current calendar month
    pub current_month: i64,
    pub social_clicks: BTreeMap<String, i64>,
    /// Events per hour of day (0..=23), from each event's own timestamp
    pub hourly: BTreeMap<u32, i64>,
    /// Page views per ISO week number
    pub weekly: BTreeMap<u32, i64>,
}

/// Fold a batch of events for one restaurant into a delta. Pure; `now`
/// anchors the current-month comparison.
pub fn fold_events(events: &[AnalyticEvent], now: DateTime<Utc>) -> StatsDelta {
    let mut delta = StatsDelta::default();

    for event in events {
        match &event.kind {
            EventKind::PageView { metadata } => {
                match metadata.page_type {
                    PageType::Profile => delta.total_views += 1,
                    PageType::Menu => delta.menu_views += 1,
                    PageType::Other => {}
                }
                if event.timestamp.year() == now.year() && event.timestamp.month() == now.month() {
                    delta.current_month += 1;
                }
                *delta
                    .weekly
                    .entry(event.timestamp.iso_week().week())
                    .or_default() += 1;
            }
            EventKind::QrScan => delta.qr_scans += 1,
            EventKind::SocialMediaClick { metadata } => {
                *delta
                    .social_clicks
                    .entry(metadata.platform.clone())
                    .or_default() += 1;
            }
        }
        *delta.hourly.entry(event.timestamp.hour()).or_default() += 1;
    }

    delta
}

pub struct AnalyticsAggregator {
    redis: RedisService,
    interval: Duration,
    batch_size: usize,
}

impl AnalyticsAggregator {
    pub fn new(redis: RedisService, interval: Duration, batch_size: usize) -> Self {
        Self {
            redis,
            interval,
            batch_size,
        }
    }

    /// Start the aggregation loop: immediate first cycle, then one per
    /// interval, until the shutdown channel flips.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                interval_secs = self.interval.as_secs(),
                batch_size = self.batch_size,
                "Analytics aggregator started"
            );
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cycle().await {
                            tracing::error!(error = %e, "Aggregation cycle failed; retrying next tick");
                        }
                    }
                    _ = shutdown.changed() => {
                        if *shutdown.borrow() {
                            tracing::info!("Analytics aggregator stopping");
                            break;
                        }
                    }
                }
            }
        })
    }

    /// One drain-and-fold cycle.
    ///
    /// Peek a bounded batch, fold per restaurant, then trim exactly the
    /// entries that were read. Trimming only after the folds keeps loss rare;
    /// a crash between fold and trim re-counts the batch next cycle. A failed
    /// restaurant is skipped for the cycle without holding up the others or
    /// the trim.
    pub async fn run_cycle(&self) -> AppResult<()> {
        let entries = self.redis.peek_events(self.batch_size).await?;
        if entries.is_empty() {
            return Ok(());
        }
        let read = entries.len();
        let now = Utc::now();

        let mut groups: BTreeMap<String, Vec<AnalyticEvent>> = BTreeMap::new();
        for raw in &entries {
            match serde_json::from_str::<AnalyticEvent>(raw) {
                Ok(event) => groups
                    .entry(event.restaurant_id.clone())
                    .or_default()
                    .push(event),
                // malformed entries still count toward the trim
                Err(e) => tracing::warn!(error = %e, "Dropping malformed analytics event"),
            }
        }

        for (restaurant_id, events) in &groups {
            if let Err(e) = self.apply_group(restaurant_id, events, now).await {
                tracing::error!(
                    restaurant_id = %restaurant_id,
                    error = %e,
                    "Failed to fold events for restaurant; skipping this cycle"
                );
            }
        }

        self.redis.trim_events(read).await?;
        tracing::debug!(events = read, restaurants = groups.len(), "Aggregation cycle complete");
        Ok(())
    }

    async fn apply_group(
        &self,
        restaurant_id: &str,
        events: &[AnalyticEvent],
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let delta = fold_events(events, now);
        self.roll_month(restaurant_id, now).await?;
        self.apply_delta(restaurant_id, &delta).await?;
        self.prune_weekly_trends(restaurant_id).await?;
        Ok(())
    }

    /// On the first fold of a new calendar month, the current counter becomes
    /// the previous one. Safe without a lock: cycles never overlap.
    async fn roll_month(&self, restaurant_id: &str, now: DateTime<Utc>) -> AppResult<()> {
        let marker = format!("{:04}-{:02}", now.year(), now.month());
        let stored = self
            .redis
            .stats_get(restaurant_id, stats_fields::MONTH_MARKER)
            .await?;
        if stored.as_deref() == Some(marker.as_str()) {
            return Ok(());
        }

        if stored.is_some() {
            let current = self
                .redis
                .stats_get(restaurant_id, stats_fields::MONTH_CURRENT)
                .await?
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0);
            self.redis
                .stats_set(restaurant_id, stats_fields::MONTH_PREVIOUS, &current.to_string())
                .await?;
            self.redis
                .stats_set(restaurant_id, stats_fields::MONTH_CURRENT, "0")
                .await?;
        }
        self.redis
            .stats_set(restaurant_id, stats_fields::MONTH_MARKER, &marker)
            .await
    }

    /// Land a delta as atomic per-field increments, so concurrent readers and
    /// a restarted aggregator never see a torn record
    async fn apply_delta(&self, restaurant_id: &str, delta: &StatsDelta) -> AppResult<()> {
        let mut increments: Vec<(String, i64)> = Vec::new();
        if delta.total_views != 0 {
            increments.push((stats_fields::TOTAL_VIEWS.to_string(), delta.total_views));
        }
        if delta.menu_views != 0 {
            increments.push((stats_fields::MENU_VIEWS.to_string(), delta.menu_views));
        }
        if delta.qr_scans != 0 {
            increments.push((stats_fields::QR_SCANS.to_string(), delta.qr_scans));
        }
        if delta.current_month != 0 {
            increments.push((stats_fields::MONTH_CURRENT.to_string(), delta.current_month));
        }
        for (platform, count) in &delta.social_clicks {
            increments.push((stats_fields::social(platform), *count));
        }
        for (hour, count) in &delta.hourly {
            increments.push((stats_fields::hour(*hour), *count));
        }
        for (week, count) in &delta.weekly {
            increments.push((stats_fields::week(*week), *count));
        }

        for (field, by) in increments {
            self.redis.stats_incr(restaurant_id, &field, by).await?;
        }
        Ok(())
    }

    /// Drop week buckets beyond the 4 most recent
    async fn prune_weekly_trends(&self, restaurant_id: &str) -> AppResult<()> {
        let fields = self.redis.stats_all(restaurant_id).await?;
        let mut weeks: Vec<u32> = fields
            .keys()
            .filter_map(|f| f.strip_prefix("week:"))
            .filter_map(|w| w.parse().ok())
            .collect();
        if weeks.len() <= WEEKLY_TREND_LIMIT {
            return Ok(());
        }
        weeks.sort_unstable_by(|a, b| b.cmp(a));
        let stale: Vec<String> = weeks[WEEKLY_TREND_LIMIT..]
            .iter()
            .map(|w| stats_fields::week(*w))
            .collect();
        self.redis.stats_del_fields(restaurant_id, &stale).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::{PageViewMetadata, SocialClickMetadata};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn event(kind: EventKind, timestamp: DateTime<Utc>) -> AnalyticEvent {
        AnalyticEvent {
            id: Uuid::new_v4(),
            restaurant_id: "r1".to_string(),
            timestamp,
            kind,
        }
    }

    fn page_view(page_type: PageType, timestamp: DateTime<Utc>) -> AnalyticEvent {
        event(
            EventKind::PageView {
                metadata: PageViewMetadata { page_type },
            },
            timestamp,
        )
    }

    #[test]
    fn test_fold_qr_scans() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let events = vec![event(EventKind::QrScan, now), event(EventKind::QrScan, now)];
        let delta = fold_events(&events, now);
        assert_eq!(delta.qr_scans, 2);
        assert_eq!(delta.total_views, 0);
        assert_eq!(delta.menu_views, 0);
    }

    #[test]
    fn test_fold_page_views_by_page_type() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let events = vec![
            page_view(PageType::Menu, now),
            page_view(PageType::Menu, now),
            page_view(PageType::Profile, now),
            page_view(PageType::Other, now),
        ];
        let delta = fold_events(&events, now);
        assert_eq!(delta.menu_views, 2);
        assert_eq!(delta.total_views, 1);
        // every page view lands in the month and week buckets
        assert_eq!(delta.current_month, 4);
        assert_eq!(delta.weekly.values().sum::<i64>(), 4);
    }

    #[test]
    fn test_fold_current_month_excludes_old_events() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();
        let delta = fold_events(
            &[page_view(PageType::Menu, now), page_view(PageType::Menu, last_month)],
            now,
        );
        assert_eq!(delta.menu_views, 2);
        assert_eq!(delta.current_month, 1);
    }

    #[test]
    fn test_fold_social_clicks_per_platform() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let click = |platform: &str| {
            event(
                EventKind::SocialMediaClick {
                    metadata: SocialClickMetadata {
                        platform: platform.to_string(),
                    },
                },
                now,
            )
        };
        let delta = fold_events(&[click("instagram"), click("instagram"), click("facebook")], now);
        assert_eq!(delta.social_clicks.get("instagram"), Some(&2));
        assert_eq!(delta.social_clicks.get("facebook"), Some(&1));
    }

    #[test]
    fn test_fold_hourly_from_event_timestamps() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 23, 0, 0).unwrap();
        let events = vec![
            event(EventKind::QrScan, Utc.with_ymd_and_hms(2026, 8, 30, 9, 15, 0).unwrap()),
            event(EventKind::QrScan, Utc.with_ymd_and_hms(2026, 8, 30, 9, 45, 0).unwrap()),
            page_view(PageType::Menu, Utc.with_ymd_and_hms(2026, 8, 30, 19, 5, 0).unwrap()),
        ];
        let delta = fold_events(&events, now);
        assert_eq!(delta.hourly.get(&9), Some(&2));
        assert_eq!(delta.hourly.get(&19), Some(&1));
    }

    #[test]
    fn test_fold_weekly_buckets_by_iso_week() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let week_a = Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap();
        let week_b = Utc.with_ymd_and_hms(2026, 8, 17, 12, 0, 0).unwrap();
        let delta = fold_events(
            &[
                page_view(PageType::Menu, week_a),
                page_view(PageType::Menu, week_a),
                page_view(PageType::Profile, week_b),
            ],
            now,
        );
        assert_eq!(delta.weekly.get(&week_a.iso_week().week()), Some(&2));
        assert_eq!(delta.weekly.get(&week_b.iso_week().week()), Some(&1));
    }

    #[test]
    fn test_fold_empty_batch() {
        let now = Utc::now();
        assert_eq!(fold_events(&[], now), StatsDelta::default());
    }
}
