//! Layered metadata resolution.
//!
//! Merges the three configuration layers into one [`ResolvedMeta`]:
//! entity override, the entity's natural fields, and the global defaults.
//! Each field resolves its own chain independently; the first non-empty
//! value wins per field.

use serde_json::json;
use std::collections::BTreeMap;

use crate::models::{
    EntityOverride, EntityType, NaturalFields, PlatformMeta, PlatformTemplate, ResolvedMeta,
    ShareTemplateOverride, SiteDefaults,
};
use crate::services::template;

/// Upper bound for `page.excerpt` in the template context, in characters.
pub const EXCERPT_MAX_CHARS: usize = 160;

/// Fallback templates used when neither the entity nor the global template
/// defines one for a platform.
const FALLBACK_TITLE_TEMPLATE: &str = "{{page.title}}";
const FALLBACK_DESCRIPTION_TEMPLATE: &str = "{{page.excerpt}}";

/// Everything the engine needs for one resolution, loaded by the caller.
#[derive(Debug, Clone, Default)]
pub struct ResolutionInput {
    pub entity_type: Option<EntityType>,
    pub natural: NaturalFields,
    pub overrides: Option<EntityOverride>,
    pub defaults: SiteDefaults,
    pub templates: BTreeMap<String, PlatformTemplate>,
    pub site_name: String,
}

/// Compute the fully merged metadata for one entity.
pub fn resolve(input: &ResolutionInput) -> ResolvedMeta {
    let overrides = input.overrides.clone().unwrap_or_default();
    let natural = &input.natural;
    let defaults = &input.defaults;

    let base_title = non_empty(overrides.seo_title.as_deref())
        .or_else(|| non_empty(natural.name.as_deref()))
        .unwrap_or_default();

    let description = non_empty(overrides.seo_description.as_deref())
        .or_else(|| non_empty(natural.description.as_deref()))
        .or_else(|| non_empty(Some(&defaults.default_description)))
        .unwrap_or_default();

    let natural_image = input
        .entity_type
        .map(|t| t.has_image())
        .unwrap_or(true)
        .then(|| natural.image_url.clone())
        .flatten();
    let image = non_empty(overrides.seo_image_url.as_deref())
        .or_else(|| non_empty(natural_image.as_deref()))
        .or_else(|| non_empty(defaults.default_image_url.as_deref()));

    let canonical = input.entity_type.and_then(|t| {
        natural
            .slug
            .as_deref()
            .map(|slug| format!("/{}s/{}", t, slug))
    });

    let title = format!("{}{}", base_title, defaults.title_suffix);
    let excerpt = truncate_chars(&description, EXCERPT_MAX_CHARS);

    // Context is assembled fresh per resolution; nothing is cached.
    let context = json!({
        "page": {
            "title": title,
            "excerpt": excerpt,
            "image": image,
            "url": canonical,
        },
        "entity": {
            "name": natural.name.clone().unwrap_or_default(),
            "type": input.entity_type.map(|t| t.to_string()),
            "slug": natural.slug,
        },
        "site": {
            "name": input.site_name,
            "suffix": defaults.title_suffix,
        },
    });

    let empty = BTreeMap::new();
    let share_overrides = overrides.share_templates.as_ref().unwrap_or(&empty);

    let platforms = input
        .templates
        .iter()
        .filter(|(_, tpl)| tpl.enabled)
        .map(|(name, tpl)| {
            let meta = resolve_platform(tpl, share_overrides.get(name), &context, image.as_deref());
            (name.clone(), meta)
        })
        .collect();

    ResolvedMeta {
        title,
        description,
        image,
        canonical,
        schema: overrides.seo_schema,
        platforms,
    }
}

/// Resolve one platform entry: entity partial override, then global
/// template, then the fallback literal token string.
fn resolve_platform(
    tpl: &PlatformTemplate,
    ovr: Option<&ShareTemplateOverride>,
    context: &serde_json::Value,
    resolved_image: Option<&str>,
) -> PlatformMeta {
    let title_template = ovr
        .and_then(|o| non_empty(o.title_template.as_deref()))
        .or_else(|| non_empty(tpl.title_template.as_deref()))
        .unwrap_or_else(|| FALLBACK_TITLE_TEMPLATE.to_string());

    let description_template = ovr
        .and_then(|o| non_empty(o.description_template.as_deref()))
        .or_else(|| non_empty(tpl.description_template.as_deref()))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION_TEMPLATE.to_string());

    let image = ovr
        .and_then(|o| non_empty(o.image_url.as_deref()))
        .or_else(|| non_empty(tpl.image_url.as_deref()))
        .or_else(|| resolved_image.map(str::to_string));

    let hashtags = ovr
        .and_then(|o| o.hashtags.clone())
        .unwrap_or_else(|| tpl.hashtags.clone());

    let subject = ovr
        .and_then(|o| non_empty(o.subject_template.as_deref()))
        .or_else(|| non_empty(tpl.subject_template.as_deref()))
        .map(|t| template::expand(&t, context));

    let body = ovr
        .and_then(|o| non_empty(o.body_template.as_deref()))
        .or_else(|| non_empty(tpl.body_template.as_deref()))
        .map(|t| template::expand(&t, context));

    PlatformMeta {
        title: template::expand(&title_template, context),
        description: template::expand(&description_template, context),
        image,
        card_type: tpl.card_type.clone(),
        hashtags,
        subject,
        body,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Char-boundary-safe prefix of at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
