//! Resolved share metadata, the output of the resolution engine.
//!
//! Derived, never persisted: recomputed fresh on every call so a settings
//! write is visible on the next request. Caching is a caller concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fully merged metadata for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
    /// One entry per enabled platform template; disabled platforms are
    /// omitted entirely.
    pub platforms: BTreeMap<String, PlatformMeta>,
}

/// Resolved per-platform share fields with all tokens expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
