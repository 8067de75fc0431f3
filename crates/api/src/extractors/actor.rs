//! Authenticated actor extractor.
//!
//! Validates the Bearer token in the Authorization header and exposes the
//! caller's id and role to handlers. Tokens are HS256 JWTs issued by the
//! site's auth system with the shared secret.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::Role;

use crate::app::AppState;
use crate::error::ApiError;

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Actor ID from the JWT subject claim.
    pub id: Uuid,
    /// Role parsed from the closed role set.
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let claims = state
            .jwt
            .validate(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Malformed subject claim".to_string()))?;

        // A syntactically valid token with a role outside the closed set
        // carries an identity but no usable capability.
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| ApiError::Forbidden(format!("Unknown role: {}", claims.role)))?;

        Ok(Actor { id, role })
    }
}
