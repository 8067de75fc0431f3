//! Share-event rollups.
//!
//! Pure aggregation over a window of events so both store backends share
//! one implementation; the store only filters rows to the window.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::models::{AnalyticsSummary, DailyTrendPoint, ShareEvent, TopEntity};

/// Number of entries reported in `top_entities`.
const TOP_ENTITIES_LIMIT: usize = 10;

/// Aggregate events within the rolling window ending at `now`.
pub fn summarize(events: &[ShareEvent], window_days: u32, now: DateTime<Utc>) -> AnalyticsSummary {
    let cutoff = now - Duration::days(i64::from(window_days));

    let mut total = 0i64;
    let mut by_platform: BTreeMap<String, i64> = BTreeMap::new();
    let mut per_entity: HashMap<(String, String), (i64, DateTime<Utc>)> = HashMap::new();
    let mut daily: BTreeMap<chrono::NaiveDate, BTreeMap<String, i64>> = BTreeMap::new();

    for event in events {
        if event.created_at < cutoff || event.created_at > now {
            continue;
        }

        total += 1;
        *by_platform.entry(event.platform.clone()).or_default() += 1;

        let key = (event.entity_type.to_string(), event.entity_id.clone());
        let entry = per_entity.entry(key).or_insert((0, event.created_at));
        entry.0 += 1;
        if event.created_at > entry.1 {
            entry.1 = event.created_at;
        }

        *daily
            .entry(event.created_at.date_naive())
            .or_default()
            .entry(event.platform.clone())
            .or_default() += 1;
    }

    let mut top_entities: Vec<TopEntity> = per_entity
        .into_iter()
        .map(|((entity_type, entity_id), (count, last_shared_at))| TopEntity {
            entity_type,
            entity_id,
            count,
            last_shared_at,
        })
        .collect();
    top_entities.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(b.last_shared_at.cmp(&a.last_shared_at))
    });
    top_entities.truncate(TOP_ENTITIES_LIMIT);

    // BTreeMap keys come out sorted and deduplicated, which is exactly the
    // daily-trend contract.
    let daily_trend = daily
        .into_iter()
        .map(|(date, platforms)| DailyTrendPoint { date, platforms })
        .collect();

    AnalyticsSummary {
        total,
        by_platform,
        top_entities,
        daily_trend,
    }
}
