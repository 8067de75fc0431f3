use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::MetaStore;
use shared::jwt::JwtConfig;

use crate::config::Config;
use crate::routes::{analytics, audit, health, purge, resolve, settings, track};
use crate::services::purge::PurgeService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetaStore>,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub purge: Arc<PurgeService>,
}

pub fn create_app(config: Config, store: Arc<dyn MetaStore>) -> Router {
    let jwt = Arc::new(config.jwt_config());
    let purge_service = Arc::new(PurgeService::new(&config.purge));
    let request_timeout = config.server.request_timeout_secs;

    let state = AppState {
        store,
        config: Arc::new(config),
        jwt,
        purge: purge_service,
    };

    // The consumer is the public site plus its admin UI on other origins;
    // preflight must answer 200 for any of them.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::put_setting),
        )
        .route(
            "/settings/entity/:entity_type/:entity_id",
            get(settings::get_entity_override).put(settings::put_entity_override),
        )
        .route("/settings/purge", post(purge::purge_url))
        .route("/settings/track", post(track::track_share))
        .route("/settings/audit", get(audit::query_audit))
        .route(
            "/settings/resolve/:entity_type/:entity_id",
            get(resolve::resolve_entity),
        )
        .route("/settings/analytics", get(analytics::analytics_summary))
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
