//! Share analytics route.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};

use domain::models::AnalyticsQuery;
use domain::services::analytics;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;

/// GET /settings/analytics?days=N
///
/// Aggregate share events over a rolling window. Any authenticated caller.
pub async fn analytics_summary(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window_days = query.window_days();
    let now = Utc::now();
    let cutoff = now - Duration::days(window_days as i64);

    let events = state.store.share_events_since(cutoff).await?;
    let summary = analytics::summarize(&events, window_days, now);

    Ok(Json(summary))
}
