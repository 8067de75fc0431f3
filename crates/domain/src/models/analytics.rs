//! Share analytics summaries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters for `GET /settings/analytics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<u32>,
}

impl AnalyticsQuery {
    /// Effective rolling window in days.
    pub fn window_days(&self) -> u32 {
        self.days.unwrap_or(7).clamp(1, 365)
    }
}

/// Aggregated share analytics over a rolling window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: i64,
    pub by_platform: BTreeMap<String, i64>,
    /// Top 10 entities by share count, ties broken by most recent share.
    pub top_entities: Vec<TopEntity>,
    /// Per-day per-platform counts, dates strictly increasing.
    pub daily_trend: Vec<DailyTrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntity {
    pub entity_type: String,
    pub entity_id: String,
    pub count: i64,
    pub last_shared_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendPoint {
    pub date: NaiveDate,
    pub platforms: BTreeMap<String, i64>,
}
