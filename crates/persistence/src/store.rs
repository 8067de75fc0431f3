//! The storage seam between request handlers and the data store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use domain::models::{
    AuditQuery, AuditRecord, EntityOverride, EntityType, GlobalSetting, NaturalFields,
    NewAuditRecord, NewShareEvent, ShareEvent,
};

/// Error type shared by all store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Row not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// All operations the settings subsystem needs from the shared data store.
///
/// Handlers are stateless over this trait; nothing resolved is cached
/// across requests. Within one write request the caller performs
/// read-old-value, write-new-value, append-audit sequentially; the trait
/// deliberately exposes no transaction, so a concurrent writer between the
/// read and the write can leave a stale audit `before_value` (accepted for
/// a low-traffic admin store, see DESIGN.md).
#[async_trait]
pub trait MetaStore: Send + Sync {
    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All global setting documents.
    async fn global_settings(&self) -> Result<Vec<GlobalSetting>, StoreError>;

    /// One global setting document by key.
    async fn global_setting(&self, key: &str) -> Result<Option<GlobalSetting>, StoreError>;

    /// Full-document upsert of one global setting.
    async fn upsert_global_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        actor: Uuid,
    ) -> Result<GlobalSetting, StoreError>;

    /// Override fields of one entity. `Ok(None)` means the entity row
    /// itself does not exist; an existing entity with no overrides yields
    /// `Some(EntityOverride::default())`.
    async fn entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<EntityOverride>, StoreError>;

    /// Replace the override fields of one entity.
    /// Fails with [`StoreError::NotFound`] if the entity row is missing.
    async fn update_entity_override(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        overrides: EntityOverride,
    ) -> Result<EntityOverride, StoreError>;

    /// Natural metadata fields of one content row.
    async fn natural_fields(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Option<NaturalFields>, StoreError>;

    /// Append one immutable audit record.
    async fn append_audit(&self, record: NewAuditRecord) -> Result<AuditRecord, StoreError>;

    /// Query audit records, newest first.
    async fn audit_records(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, StoreError>;

    /// Ingest one share event.
    async fn insert_share_event(&self, event: NewShareEvent) -> Result<ShareEvent, StoreError>;

    /// All share events created at or after `cutoff`.
    async fn share_events_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ShareEvent>, StoreError>;
}
