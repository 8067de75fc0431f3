//! Global settings documents and their typed read boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

/// Key of the site-wide defaults document.
pub const DEFAULTS_KEY: &str = "defaults";
/// Key of the per-platform templates document.
pub const TEMPLATES_KEY: &str = "templates";

/// One global setting row: a structured document under a unique key.
/// Writes are full-document replacement, not partial patches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSetting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
}

/// Typed view of the `"defaults"` document.
///
/// The store keeps the raw document; this struct is the validated shape at
/// the read boundary. Missing fields fall back to empty defaults so a
/// half-filled document still resolves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SiteDefaults {
    pub title_suffix: String,
    pub default_description: String,
    pub default_image_url: Option<String>,
}

impl SiteDefaults {
    /// Deserialize leniently from a raw settings document.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// One per-platform share template inside the `"templates"` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PlatformTemplate {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
    /// Subject line for non-visual channels (email, telegram).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_template: Option<String>,
}

/// Typed view of the `"templates"` document: platform name to template.
pub fn templates_from_value(
    value: Option<&serde_json::Value>,
) -> BTreeMap<String, PlatformTemplate> {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

/// Request body for `PUT /settings`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSettingRequest {
    #[validate(length(min = 1, max = 64))]
    pub key: String,
    pub value: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_site_defaults_lenient_read() {
        let doc = json!({"title_suffix": " | Site"});
        let defaults = SiteDefaults::from_value(Some(&doc));
        assert_eq!(defaults.title_suffix, " | Site");
        assert_eq!(defaults.default_description, "");
        assert!(defaults.default_image_url.is_none());
    }

    #[test]
    fn test_site_defaults_missing_document() {
        let defaults = SiteDefaults::from_value(None);
        assert_eq!(defaults.title_suffix, "");
    }

    #[test]
    fn test_site_defaults_malformed_document() {
        let defaults = SiteDefaults::from_value(Some(&json!("not an object")));
        assert_eq!(defaults.title_suffix, "");
    }

    #[test]
    fn test_templates_from_value() {
        let doc = json!({
            "whatsapp": {"enabled": true, "title_template": "{{entity.name}} awaits!"},
            "facebook": {"enabled": false}
        });
        let templates = templates_from_value(Some(&doc));
        assert_eq!(templates.len(), 2);
        assert!(templates["whatsapp"].enabled);
        assert_eq!(
            templates["whatsapp"].title_template.as_deref(),
            Some("{{entity.name}} awaits!")
        );
        assert!(!templates["facebook"].enabled);
        assert!(templates["facebook"].hashtags.is_empty());
    }

    #[test]
    fn test_upsert_setting_request_validation() {
        let req = UpsertSettingRequest {
            key: "".to_string(),
            value: json!({}),
        };
        assert!(req.validate().is_err());

        let req = UpsertSettingRequest {
            key: "defaults".to_string(),
            value: json!({"title_suffix": " | Site"}),
        };
        assert!(req.validate().is_ok());
    }
}
