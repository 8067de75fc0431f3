//! Per-entity metadata override fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Optional override fields attached to a content entity.
/// A `None` field means "defer to the next resolution layer".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityOverride {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_image_url: Option<String>,
    /// Structured-data blob emitted alongside the resolved metadata.
    pub seo_schema: Option<serde_json::Value>,
    /// Per-platform partial template overrides, keyed by platform name.
    pub share_templates: Option<BTreeMap<String, ShareTemplateOverride>>,
}

/// Partial override of one platform template. Set fields win over the
/// global template; unset fields fall through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ShareTemplateOverride {
    pub title_template: Option<String>,
    pub description_template: Option<String>,
    pub image_url: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub subject_template: Option<String>,
    pub body_template: Option<String>,
}

/// Request body for `PUT /settings/entity/{type}/{id}`.
///
/// Fields mirror [`EntityOverride`]; the write replaces all override fields
/// of the entity with the submitted values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateOverrideRequest {
    #[validate(length(max = 300))]
    pub seo_title: Option<String>,
    #[validate(length(max = 1000))]
    pub seo_description: Option<String>,
    #[validate(url)]
    pub seo_image_url: Option<String>,
    pub seo_schema: Option<serde_json::Value>,
    pub share_templates: Option<BTreeMap<String, ShareTemplateOverride>>,
}

impl EntityOverride {
    /// True when every override field defers to the next layer.
    /// Used to classify a write as `create` vs `update` in the audit trail.
    pub fn is_empty(&self) -> bool {
        self.seo_title.is_none()
            && self.seo_description.is_none()
            && self.seo_image_url.is_none()
            && self.seo_schema.is_none()
            && self.share_templates.is_none()
    }
}

impl From<UpdateOverrideRequest> for EntityOverride {
    fn from(req: UpdateOverrideRequest) -> Self {
        EntityOverride {
            seo_title: req.seo_title,
            seo_description: req.seo_description,
            seo_image_url: req.seo_image_url,
            seo_schema: req.seo_schema,
            share_templates: req.share_templates,
        }
    }
}
