//! Common test utilities for integration tests.
//!
//! Builds the full axum application over the in-memory store so the HTTP
//! surface can be exercised without a database.

// Helper utilities intentionally available to all integration tests, even
// those that only use a subset.
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use domain::models::{EntityType, NaturalFields};
use persistence::MemoryMetaStore;
use share_meta_api::app::create_app;
use share_meta_api::config::{
    Config, DatabaseConfig, JwtAuthConfig, LoggingConfig, PurgeConfig, ServerConfig, SiteConfig,
};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            backend: "memory".to_string(),
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        site: SiteConfig {
            name: "Site".to_string(),
        },
        jwt: JwtAuthConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_secs: 900,
            leeway_secs: 30,
        },
        purge: PurgeConfig::default(),
    }
}

/// Build the application over a fresh in-memory store.
pub fn test_app() -> (Router, Arc<MemoryMetaStore>) {
    let store = Arc::new(MemoryMetaStore::new());
    let app = create_app(test_config(), store.clone());
    (app, store)
}

/// Bearer header value for a fresh actor with the given role.
pub fn bearer(role: &str) -> String {
    let jwt = shared::jwt::JwtConfig::new(TEST_JWT_SECRET, 900);
    let token = jwt
        .issue(Uuid::new_v4(), role)
        .expect("Failed to issue test token");
    format!("Bearer {}", token)
}

/// Seed the canonical test entity: village 123, "Bageshwar".
pub async fn seed_village(store: &MemoryMetaStore) {
    store
        .seed_entity(
            EntityType::Village,
            "123",
            NaturalFields {
                name: Some("Bageshwar".to_string()),
                description: Some("A quiet village in the Kumaon hills.".to_string()),
                image_url: Some("https://cdn.example.org/bageshwar.jpg".to_string()),
                slug: Some("bageshwar".to_string()),
            },
        )
        .await;
}

/// Send one request and return (status, parsed JSON body).
/// Empty bodies parse as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }

    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, json)
}
