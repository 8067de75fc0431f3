use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use persistence::{db, MemoryMetaStore, MetaStore, PgMetaStore};

mod app;
mod config;
mod error;
mod extractors;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);

    info!("Starting Share Metadata API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn MetaStore> = match config.database.backend.as_str() {
        "memory" => {
            info!("Using in-memory store backend");
            Arc::new(MemoryMetaStore::new())
        }
        _ => {
            let pool = db::create_pool(&config.database.to_pool_config()).await?;

            info!("Running database migrations...");
            db::run_migrations(&pool).await?;
            info!("Migrations completed");

            Arc::new(PgMetaStore::new(pool))
        }
    };

    let addr = config.socket_addr();
    let app = app::create_app(config, store);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
