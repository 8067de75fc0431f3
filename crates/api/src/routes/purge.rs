//! Preview-cache purge route.

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;
use validator::Validate;

use domain::models::PurgeRequest;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;

/// POST /settings/purge
///
/// Best-effort purge of cached share previews for one URL across all known
/// platforms. Admin-tier roles only. Always answers 200 with one tagged
/// outcome per platform; platform failures never escalate.
pub async fn purge_url(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<PurgeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !actor.role.can_purge() {
        return Err(ApiError::Forbidden(
            "Purge requires an admin-tier role".to_string(),
        ));
    }

    request.validate()?;

    let outcomes = state.purge.purge_all(&request.url).await;

    info!(
        actor_id = %actor.id,
        url = %request.url,
        platforms = outcomes.len(),
        "Attempted preview cache purge"
    );

    Ok(Json(outcomes))
}
