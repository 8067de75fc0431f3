//! Domain models for the share-metadata backend.

pub mod analytics;
pub mod audit;
pub mod entity;
pub mod overrides;
pub mod purge;
pub mod resolved;
pub mod role;
pub mod settings;
pub mod share_event;

pub use analytics::{AnalyticsQuery, AnalyticsSummary, DailyTrendPoint, TopEntity};
pub use audit::{AuditQuery, AuditRecord, ChangeType, NewAuditRecord, GLOBAL_SETTINGS_ENTITY_TYPE};
pub use entity::{EntityType, InvalidEntityType, NaturalFields};
pub use overrides::{EntityOverride, ShareTemplateOverride, UpdateOverrideRequest};
pub use purge::{PurgeOutcome, PurgeRequest};
pub use resolved::{PlatformMeta, ResolvedMeta};
pub use role::Role;
pub use settings::{
    templates_from_value, GlobalSetting, PlatformTemplate, SiteDefaults, UpsertSettingRequest,
    DEFAULTS_KEY, TEMPLATES_KEY,
};
pub use share_event::{NewShareEvent, ShareEvent, TrackRequest};
