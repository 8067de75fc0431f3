//! Share event ingestion route.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::warn;
use validator::Validate;

use domain::models::{EntityType, NewShareEvent, TrackRequest};
use shared::crypto::ip_hash;

use crate::app::AppState;
use crate::error::ApiError;

/// Client IP as reported by the proxy, or a fixed placeholder. Only the
/// day-rotating hash of this value is ever stored.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// POST /settings/track
///
/// Ingest one anonymized share event. Public and best-effort: a store
/// failure is logged and swallowed so tracking can never block the
/// user-facing share action.
pub async fn track_share(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TrackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    let entity_type: EntityType = request.entity_type.parse()?;

    let event = NewShareEvent {
        entity_type,
        entity_id: request.entity_id,
        platform: request.platform,
        url: request.url,
        referrer: header_value(&headers, "referer"),
        user_agent: header_value(&headers, "user-agent"),
        ip_hash: ip_hash(&client_ip(&headers), Utc::now().date_naive()),
    };

    if let Err(err) = state.store.insert_share_event(event).await {
        warn!(error = %err, "Failed to record share event");
    }

    Ok(StatusCode::NO_CONTENT)
}
