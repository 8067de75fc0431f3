//! In-memory store backend.
//!
//! Backs the integration test suite and local runs without a database.
//! Not meant for production: contents vanish on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::models::{
    AuditQuery, AuditRecord, EntityOverride, EntityType, GlobalSetting, NaturalFields,
    NewAuditRecord, NewShareEvent, ShareEvent,
};

use crate::store::{MetaStore, StoreError};

#[derive(Debug, Clone, Default)]
struct EntityRecord {
    natural: NaturalFields,
    overrides: EntityOverride,
}

#[derive(Default)]
struct Inner {
    settings: BTreeMap<String, GlobalSetting>,
    entities: HashMap<(EntityType, String), EntityRecord>,
    audits: Vec<AuditRecord>,
    events: Vec<ShareEvent>,
}

/// Thread-safe in-memory [`MetaStore`] implementation.
#[derive(Default)]
pub struct MemoryMetaStore {
    inner: RwLock<Inner>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a content row with the given natural fields. Test seeding.
    pub async fn seed_entity(&self, entity_type: EntityType, entity_id: &str, natural: NaturalFields) {
        let mut inner = self.inner.write().await;
        inner.entities.insert(
            (entity_type, entity_id.to_string()),
            EntityRecord {
                natural,
                overrides: EntityOverride::default(),
            },
        );
    }
}

#[async_trait]
impl MetaStore for MemoryMetaStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn global_settings(&self) -> Result<Vec<GlobalSetting>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.settings.values().cloned().collect())
    }

    async fn global_setting(&self, key: &str) -> Result<Option<GlobalSetting>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.settings.get(key).cloned())
    }

    async fn upsert_global_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        actor: Uuid,
    ) -> Result<GlobalSetting, StoreError> {
        let mut inner = self.inner.write().await;
        let setting = GlobalSetting {
            key: key.to_string(),
            value,
            updated_at: Utc::now(),
            updated_by: Some(actor),
        };
        inner.settings.insert(key.to_string(), setting.clone());
        Ok(setting)
    }

    async fn entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<EntityOverride>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entities
            .get(&(entity_type, entity_id.to_string()))
            .map(|record| record.overrides.clone()))
    }

    async fn update_entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        overrides: EntityOverride,
    ) -> Result<EntityOverride, StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .entities
            .get_mut(&(entity_type, entity_id.to_string()))
            .ok_or(StoreError::NotFound)?;
        record.overrides = overrides.clone();
        Ok(overrides)
    }

    async fn natural_fields(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<NaturalFields>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entities
            .get(&(entity_type, entity_id.to_string()))
            .map(|record| record.natural.clone()))
    }

    async fn append_audit(&self, record: NewAuditRecord) -> Result<AuditRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let stored = AuditRecord {
            id: Uuid::new_v4(),
            changed_by: record.changed_by,
            entity_type: record.entity_type,
            entity_id: record.entity_id,
            change_type: record.change_type,
            before_value: record.before_value,
            after_value: record.after_value,
            created_at: Utc::now(),
        };
        inner.audits.push(stored.clone());
        Ok(stored)
    }

    async fn audit_records(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, StoreError> {
        let inner = self.inner.read().await;
        let limit = query.effective_limit() as usize;
        // Appended in insertion order; reversed iteration is newest-first.
        Ok(inner
            .audits
            .iter()
            .rev()
            .filter(|r| {
                query
                    .entity_type
                    .as_ref()
                    .map_or(true, |t| &r.entity_type == t)
            })
            .filter(|r| {
                query
                    .entity_id
                    .as_ref()
                    .map_or(true, |id| r.entity_id.as_ref() == Some(id))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_share_event(&self, event: NewShareEvent) -> Result<ShareEvent, StoreError> {
        let mut inner = self.inner.write().await;
        let stored = ShareEvent {
            id: Uuid::new_v4(),
            entity_type: event.entity_type,
            entity_id: event.entity_id,
            platform: event.platform,
            url: event.url,
            referrer: event.referrer,
            user_agent: event.user_agent,
            ip_hash: event.ip_hash,
            created_at: Utc::now(),
        };
        inner.events.push(stored.clone());
        Ok(stored)
    }

    async fn share_events_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ShareEvent>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.created_at >= cutoff)
            .cloned()
            .collect())
    }
}
