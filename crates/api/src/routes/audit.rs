//! Audit trail query route.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use domain::models::AuditQuery;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;

/// GET /settings/audit
///
/// Query audit records, newest first. Any authenticated caller.
pub async fn query_audit(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<AuditQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.store.audit_records(&query).await?;
    Ok(Json(records))
}
