//! Metadata resolution route.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use domain::models::{templates_from_value, EntityType, SiteDefaults, DEFAULTS_KEY, TEMPLATES_KEY};
use domain::services::resolution::{self, ResolutionInput};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /settings/resolve/:entity_type/:entity_id
///
/// Compute the fully merged share metadata for one entity. Public: the
/// rendering site calls this on every page view, so nothing here is cached
/// or gated.
pub async fn resolve_entity(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let entity_type: EntityType = entity_type.parse()?;

    let natural = state
        .store
        .natural_fields(entity_type, &entity_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", entity_type, entity_id)))?;

    let overrides = state.store.entity_override(entity_type, &entity_id).await?;

    let defaults_doc = state.store.global_setting(DEFAULTS_KEY).await?;
    let templates_doc = state.store.global_setting(TEMPLATES_KEY).await?;

    let input = ResolutionInput {
        entity_type: Some(entity_type),
        natural,
        overrides,
        defaults: SiteDefaults::from_value(defaults_doc.as_ref().map(|s| &s.value)),
        templates: templates_from_value(templates_doc.as_ref().map(|s| &s.value)),
        site_name: state.config.site.name.clone(),
    };

    Ok(Json(resolution::resolve(&input)))
}
