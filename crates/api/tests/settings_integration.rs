//! Integration tests for global settings, entity overrides, and the audit
//! trail, driven through the full HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{bearer, seed_village, send, test_app};

#[tokio::test]
async fn test_put_and_get_global_settings() {
    let (app, _store) = test_app();

    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(&bearer("super_admin")),
        Some(json!({"key": "defaults", "value": {"title_suffix": " | Site"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], "defaults");
    assert_eq!(body["value"]["title_suffix"], " | Site");

    let (status, body) = send(&app, "GET", "/settings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["defaults"]["title_suffix"], " | Site");
}

#[tokio::test]
async fn test_put_settings_requires_super_admin() {
    let (app, _store) = test_app();
    let body = json!({"key": "defaults", "value": {}});

    let (status, _) = send(&app, "PUT", "/settings", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    for role in ["admin", "content_manager", "seo_manager", "guide"] {
        let (status, err) = send(
            &app,
            "PUT",
            "/settings",
            Some(&bearer(role)),
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {}", role);
        assert_eq!(err["error"], "forbidden");
    }
}

#[tokio::test]
async fn test_put_settings_rejects_empty_key() {
    let (app, _store) = test_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(&bearer("super_admin")),
        Some(json!({"key": "", "value": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_override_write_by_seo_manager_produces_one_audit_record() {
    let (app, store) = test_app();
    seed_village(&store).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/settings/entity/village/123",
        Some(&bearer("seo_manager")),
        Some(json!({"seoTitle": "Custom"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seoTitle"], "Custom");

    let (status, records) = send(
        &app,
        "GET",
        "/settings/audit",
        Some(&bearer("super_admin")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["entityType"], "village");
    assert_eq!(records[0]["entityId"], "123");
    assert_eq!(records[0]["changeType"], "create");
    assert_eq!(records[0]["afterValue"]["seoTitle"], "Custom");
    assert!(records[0].get("beforeValue").is_none());
}

#[tokio::test]
async fn test_override_write_by_guide_is_forbidden_and_unaudited() {
    let (app, store) = test_app();
    seed_village(&store).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/settings/entity/village/123",
        Some(&bearer("guide")),
        Some(json!({"seoTitle": "Custom"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, records) = send(
        &app,
        "GET",
        "/settings/audit",
        Some(&bearer("super_admin")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(records.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_second_override_write_captures_before_value() {
    let (app, store) = test_app();
    seed_village(&store).await;
    let auth = bearer("admin");

    send(
        &app,
        "PUT",
        "/settings/entity/village/123",
        Some(&auth),
        Some(json!({"seoTitle": "First"})),
    )
    .await;
    send(
        &app,
        "PUT",
        "/settings/entity/village/123",
        Some(&auth),
        Some(json!({"seoTitle": "Second"})),
    )
    .await;

    let (_, records) = send(&app, "GET", "/settings/audit", Some(&auth), None).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    // Newest first.
    assert_eq!(records[0]["changeType"], "update");
    assert_eq!(records[0]["beforeValue"]["seoTitle"], "First");
    assert_eq!(records[0]["afterValue"]["seoTitle"], "Second");
    assert_eq!(records[1]["changeType"], "create");
}

#[tokio::test]
async fn test_get_override_roundtrip_and_errors() {
    let (app, store) = test_app();
    seed_village(&store).await;

    let (status, body) = send(&app, "GET", "/settings/entity/village/123", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["seoTitle"].is_null());

    let (status, body) = send(&app, "GET", "/settings/entity/podcast/123", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_entity_type");

    let (status, _) = send(&app, "GET", "/settings/entity/village/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_override_write_on_missing_entity_is_not_found() {
    let (app, _store) = test_app();
    let (status, _) = send(
        &app,
        "PUT",
        "/settings/entity/village/999",
        Some(&bearer("admin")),
        Some(json!({"seoTitle": "Custom"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audit_requires_authentication() {
    let (app, _store) = test_app();
    let (status, _) = send(&app, "GET", "/settings/audit", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "GET",
        "/settings/audit",
        Some("Bearer not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_audit_filters_by_entity() {
    let (app, store) = test_app();
    seed_village(&store).await;
    let auth = bearer("super_admin");

    send(
        &app,
        "PUT",
        "/settings",
        Some(&auth),
        Some(json!({"key": "defaults", "value": {"title_suffix": " | A"}})),
    )
    .await;
    send(
        &app,
        "PUT",
        "/settings/entity/village/123",
        Some(&auth),
        Some(json!({"seoTitle": "Custom"})),
    )
    .await;

    let (_, records) = send(
        &app,
        "GET",
        "/settings/audit?entity_type=global_settings",
        Some(&auth),
        None,
    )
    .await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["entityType"], "global_settings");

    let (_, records) = send(
        &app,
        "GET",
        "/settings/audit?entity_type=village&entity_id=123",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_role_in_token_is_forbidden() {
    let (app, _store) = test_app();
    let (status, _) = send(
        &app,
        "PUT",
        "/settings",
        Some(&bearer("janitor")),
        Some(json!({"key": "defaults", "value": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
