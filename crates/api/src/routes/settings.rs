//! Global settings and per-entity override routes.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use tracing::{error, info};
use validator::Validate;

use domain::models::{
    ChangeType, EntityOverride, EntityType, NewAuditRecord, UpdateOverrideRequest,
    UpsertSettingRequest, GLOBAL_SETTINGS_ENTITY_TYPE,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;

/// Audit appends are best-effort: a failure is surfaced in logs but never
/// rolls back the configuration write it describes.
async fn append_audit_best_effort(state: &AppState, record: NewAuditRecord) {
    let entity_type = record.entity_type.clone();
    if let Err(err) = state.store.append_audit(record).await {
        error!(
            entity_type = %entity_type,
            error = %err,
            "Failed to append audit record"
        );
    }
}

/// GET /settings
///
/// All global setting documents keyed by `key`.
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = state.store.global_settings().await?;

    let mut body = Map::new();
    for setting in settings {
        body.insert(setting.key, setting.value);
    }

    Ok(Json(Value::Object(body)))
}

/// PUT /settings
///
/// Full-document upsert of one global setting. Super administrator only.
pub async fn put_setting(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !actor.role.can_manage_global_settings() {
        return Err(ApiError::Forbidden(
            "Global settings writes require the super_admin role".to_string(),
        ));
    }

    request.validate()?;

    let before = state.store.global_setting(&request.key).await?;
    let change_type = if before.is_some() {
        ChangeType::Update
    } else {
        ChangeType::Create
    };

    let updated = state
        .store
        .upsert_global_setting(&request.key, request.value.clone(), actor.id)
        .await?;

    append_audit_best_effort(
        &state,
        NewAuditRecord {
            changed_by: actor.id,
            entity_type: GLOBAL_SETTINGS_ENTITY_TYPE.to_string(),
            entity_id: Some(request.key.clone()),
            change_type,
            before_value: before.map(|s| s.value),
            after_value: updated.value.clone(),
        },
    )
    .await;

    info!(
        actor_id = %actor.id,
        key = %updated.key,
        change_type = %change_type,
        "Updated global setting"
    );

    Ok(Json(updated))
}

/// GET /settings/entity/:entity_type/:entity_id
///
/// Raw override fields of one entity, without resolution.
pub async fn get_entity_override(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let entity_type: EntityType = entity_type.parse()?;

    let overrides = state
        .store
        .entity_override(entity_type, &entity_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", entity_type, entity_id)))?;

    Ok(Json(overrides))
}

/// PUT /settings/entity/:entity_type/:entity_id
///
/// Replace the override fields of one entity. Admin-tier roles only.
pub async fn put_entity_override(
    State(state): State<AppState>,
    actor: Actor,
    Path((entity_type, entity_id)): Path<(String, String)>,
    Json(request): Json<UpdateOverrideRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !actor.role.can_edit_overrides() {
        return Err(ApiError::Forbidden(
            "Override writes require an admin-tier role".to_string(),
        ));
    }

    let entity_type: EntityType = entity_type.parse()?;
    request.validate()?;

    let before = state
        .store
        .entity_override(entity_type, &entity_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", entity_type, entity_id)))?;

    // First write onto a pristine entity is a create.
    let change_type = if before.is_empty() {
        ChangeType::Create
    } else {
        ChangeType::Update
    };

    let overrides: EntityOverride = request.into();
    let updated = state
        .store
        .update_entity_override(entity_type, &entity_id, overrides)
        .await?;

    let before_value = if before.is_empty() {
        None
    } else {
        serde_json::to_value(&before).ok()
    };
    let after_value = serde_json::to_value(&updated)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize override: {}", e)))?;

    append_audit_best_effort(
        &state,
        NewAuditRecord {
            changed_by: actor.id,
            entity_type: entity_type.as_str().to_string(),
            entity_id: Some(entity_id.clone()),
            change_type,
            before_value,
            after_value,
        },
    )
    .await;

    info!(
        actor_id = %actor.id,
        entity_type = %entity_type,
        entity_id = %entity_id,
        change_type = %change_type,
        "Updated entity override"
    );

    Ok(Json(updated))
}
