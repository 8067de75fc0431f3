//! PostgreSQL store backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

use domain::models::{
    AuditQuery, AuditRecord, ChangeType, EntityOverride, EntityType, GlobalSetting, NaturalFields,
    NewAuditRecord, NewShareEvent, ShareEvent, ShareTemplateOverride,
};

use crate::metrics::QueryTimer;
use crate::store::{MetaStore, StoreError};

/// Content table backing each entity type.
fn content_table(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Village => "villages",
        EntityType::District => "districts",
        EntityType::Provider => "providers",
        EntityType::Listing => "listings",
        EntityType::Package => "packages",
        EntityType::Product => "products",
        EntityType::Story => "stories",
        EntityType::Event => "events",
        EntityType::Page => "pages",
        EntityType::Thought => "thoughts",
    }
}

/// Select expression for the natural image column. Tables without one
/// project a NULL so every content table reads through the same row shape.
fn image_select(entity_type: EntityType) -> &'static str {
    if entity_type.has_image() {
        "image_url"
    } else {
        "NULL::text AS image_url"
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GlobalSettingRow {
    key: String,
    value: serde_json::Value,
    updated_at: DateTime<Utc>,
    updated_by: Option<Uuid>,
}

impl From<GlobalSettingRow> for GlobalSetting {
    fn from(row: GlobalSettingRow) -> Self {
        GlobalSetting {
            key: row.key,
            value: row.value,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OverrideRow {
    seo_title: Option<String>,
    seo_description: Option<String>,
    seo_image_url: Option<String>,
    seo_schema: Option<serde_json::Value>,
    share_templates: Option<serde_json::Value>,
}

impl OverrideRow {
    fn into_override(self) -> Result<EntityOverride, StoreError> {
        let share_templates = self
            .share_templates
            .map(serde_json::from_value::<BTreeMap<String, ShareTemplateOverride>>)
            .transpose()
            .map_err(|e| StoreError::Database(format!("Malformed share_templates column: {e}")))?;
        Ok(EntityOverride {
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            seo_image_url: self.seo_image_url,
            seo_schema: self.seo_schema,
            share_templates,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NaturalRow {
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    slug: Option<String>,
}

impl From<NaturalRow> for NaturalFields {
    fn from(row: NaturalRow) -> Self {
        NaturalFields {
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            slug: row.slug,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    changed_by: Uuid,
    entity_type: String,
    entity_id: Option<String>,
    change_type: String,
    before_value: Option<serde_json::Value>,
    after_value: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<AuditRow> for AuditRecord {
    fn from(row: AuditRow) -> Self {
        let change_type = if row.change_type == "create" {
            ChangeType::Create
        } else {
            ChangeType::Update
        };
        AuditRecord {
            id: row.id,
            changed_by: row.changed_by,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            change_type,
            before_value: row.before_value,
            after_value: row.after_value,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShareEventRow {
    id: Uuid,
    entity_type: String,
    entity_id: String,
    platform: String,
    url: String,
    referrer: Option<String>,
    user_agent: Option<String>,
    ip_hash: String,
    created_at: DateTime<Utc>,
}

impl ShareEventRow {
    fn into_event(self) -> Result<ShareEvent, StoreError> {
        let entity_type = self
            .entity_type
            .parse::<EntityType>()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(ShareEvent {
            id: self.id,
            entity_type,
            entity_id: self.entity_id,
            platform: self.platform,
            url: self.url,
            referrer: self.referrer,
            user_agent: self.user_agent,
            ip_hash: self.ip_hash,
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL-backed [`MetaStore`].
#[derive(Clone)]
pub struct PgMetaStore {
    pool: PgPool,
}

impl PgMetaStore {
    /// Creates a new PgMetaStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MetaStore for PgMetaStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn global_settings(&self) -> Result<Vec<GlobalSetting>, StoreError> {
        let timer = QueryTimer::new("global_settings_list");
        let rows = sqlx::query_as::<_, GlobalSettingRow>(
            r#"
            SELECT key, value, updated_at, updated_by
            FROM global_settings
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(rows?.into_iter().map(GlobalSetting::from).collect())
    }

    async fn global_setting(&self, key: &str) -> Result<Option<GlobalSetting>, StoreError> {
        let timer = QueryTimer::new("global_setting_get");
        let row = sqlx::query_as::<_, GlobalSettingRow>(
            r#"
            SELECT key, value, updated_at, updated_by
            FROM global_settings
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(row?.map(GlobalSetting::from))
    }

    async fn upsert_global_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        actor: Uuid,
    ) -> Result<GlobalSetting, StoreError> {
        let timer = QueryTimer::new("global_setting_upsert");
        let row = sqlx::query_as::<_, GlobalSettingRow>(
            r#"
            INSERT INTO global_settings (key, value, updated_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (key)
            DO UPDATE SET value = $2, updated_by = $3, updated_at = NOW()
            RETURNING key, value, updated_at, updated_by
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(actor)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(GlobalSetting::from(row?))
    }

    async fn entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<EntityOverride>, StoreError> {
        let timer = QueryTimer::new("entity_override_get");
        // Table names come from the closed EntityType set, never from input.
        let query = format!(
            r#"
            SELECT seo_title, seo_description, seo_image_url, seo_schema, share_templates
            FROM {}
            WHERE id = $1
            "#,
            content_table(entity_type)
        );
        let row = sqlx::query_as::<_, OverrideRow>(&query)
            .bind(entity_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        row?.map(OverrideRow::into_override).transpose()
    }

    async fn update_entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        overrides: EntityOverride,
    ) -> Result<EntityOverride, StoreError> {
        let timer = QueryTimer::new("entity_override_update");
        let share_templates = overrides
            .share_templates
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let query = format!(
            r#"
            UPDATE {}
            SET seo_title = $2, seo_description = $3, seo_image_url = $4,
                seo_schema = $5, share_templates = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING seo_title, seo_description, seo_image_url, seo_schema, share_templates
            "#,
            content_table(entity_type)
        );
        let row = sqlx::query_as::<_, OverrideRow>(&query)
            .bind(entity_id)
            .bind(&overrides.seo_title)
            .bind(&overrides.seo_description)
            .bind(&overrides.seo_image_url)
            .bind(&overrides.seo_schema)
            .bind(&share_templates)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        row?.ok_or(StoreError::NotFound)?.into_override()
    }

    async fn natural_fields(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<NaturalFields>, StoreError> {
        let timer = QueryTimer::new("natural_fields_get");
        let query = format!(
            r#"
            SELECT name, description, {}, slug
            FROM {}
            WHERE id = $1
            "#,
            image_select(entity_type),
            content_table(entity_type)
        );
        let row = sqlx::query_as::<_, NaturalRow>(&query)
            .bind(entity_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(row?.map(NaturalFields::from))
    }

    async fn append_audit(&self, record: NewAuditRecord) -> Result<AuditRecord, StoreError> {
        let timer = QueryTimer::new("audit_append");
        let row = sqlx::query_as::<_, AuditRow>(
            r#"
            INSERT INTO audit_records (changed_by, entity_type, entity_id, change_type, before_value, after_value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, changed_by, entity_type, entity_id, change_type, before_value, after_value, created_at
            "#,
        )
        .bind(record.changed_by)
        .bind(&record.entity_type)
        .bind(&record.entity_id)
        .bind(record.change_type.to_string())
        .bind(&record.before_value)
        .bind(&record.after_value)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(AuditRecord::from(row?))
    }

    async fn audit_records(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, StoreError> {
        let timer = QueryTimer::new("audit_list");
        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT id, changed_by, entity_type, entity_id, change_type, before_value, after_value, created_at
            FROM audit_records
            WHERE ($1::text IS NULL OR entity_type = $1)
              AND ($2::text IS NULL OR entity_id = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(&query.entity_type)
        .bind(&query.entity_id)
        .bind(query.effective_limit())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(rows?.into_iter().map(AuditRecord::from).collect())
    }

    async fn insert_share_event(&self, event: NewShareEvent) -> Result<ShareEvent, StoreError> {
        let timer = QueryTimer::new("share_event_insert");
        let row = sqlx::query_as::<_, ShareEventRow>(
            r#"
            INSERT INTO share_events (entity_type, entity_id, platform, url, referrer, user_agent, ip_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, entity_type, entity_id, platform, url, referrer, user_agent, ip_hash, created_at
            "#,
        )
        .bind(event.entity_type.as_str())
        .bind(&event.entity_id)
        .bind(&event.platform)
        .bind(&event.url)
        .bind(&event.referrer)
        .bind(&event.user_agent)
        .bind(&event.ip_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        row?.into_event()
    }

    async fn share_events_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ShareEvent>, StoreError> {
        let timer = QueryTimer::new("share_events_since");
        let rows = sqlx::query_as::<_, ShareEventRow>(
            r#"
            SELECT id, entity_type, entity_id, platform, url, referrer, user_agent, ip_hash, created_at
            FROM share_events
            WHERE created_at >= $1
            ORDER BY created_at
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        rows?.into_iter().map(ShareEventRow::into_event).collect()
    }
}
