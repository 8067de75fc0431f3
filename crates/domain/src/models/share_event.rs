//! Anonymized share events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::entity::EntityType;

/// One ingested share event. Written once, never mutated.
///
/// `ip_hash` is the day-rotating digest from [`shared::crypto::ip_hash`];
/// the raw client IP is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareEvent {
    pub id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub ip_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for one share-event insert.
#[derive(Debug, Clone)]
pub struct NewShareEvent {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub platform: String,
    pub url: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_hash: String,
}

/// Request body for `POST /settings/track`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub entity_type: String,
    #[validate(length(min = 1, max = 128))]
    pub entity_id: String,
    #[validate(length(min = 1, max = 64))]
    pub platform: String,
    #[validate(url)]
    pub url: String,
}
