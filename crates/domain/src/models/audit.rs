//! Audit trail records for configuration writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `entity_type` value used for audit records of global settings writes.
pub const GLOBAL_SETTINGS_ENTITY_TYPE: &str = "global_settings";

/// Kind of configuration change: `create` when no prior value existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Create,
    Update,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Create => write!(f, "create"),
            ChangeType::Update => write!(f, "update"),
        }
    }
}

/// One immutable audit record. Never updated or deleted after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: Uuid,
    pub changed_by: Uuid,
    /// `"global_settings"` or a content type name.
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub change_type: ChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_value: Option<serde_json::Value>,
    pub after_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Input for one audit append.
#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    pub changed_by: Uuid,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub change_type: ChangeType,
    pub before_value: Option<serde_json::Value>,
    pub after_value: serde_json::Value,
}

/// Query parameters for `GET /settings/audit`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<i64>,
}

impl AuditQuery {
    /// Effective limit, clamped to a sane page size.
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ChangeType::Create).unwrap(),
            "\"create\""
        );
        assert_eq!(
            serde_json::to_string(&ChangeType::Update).unwrap(),
            "\"update\""
        );
    }

    #[test]
    fn test_change_type_display() {
        assert_eq!(ChangeType::Create.to_string(), "create");
        assert_eq!(ChangeType::Update.to_string(), "update");
    }

    #[test]
    fn test_effective_limit_clamping() {
        assert_eq!(AuditQuery::default().effective_limit(), 50);
        let q = AuditQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(q.effective_limit(), 1);
        let q = AuditQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(q.effective_limit(), 500);
    }

    #[test]
    fn test_audit_record_hides_empty_before_value() {
        let record = AuditRecord {
            id: Uuid::new_v4(),
            changed_by: Uuid::new_v4(),
            entity_type: GLOBAL_SETTINGS_ENTITY_TYPE.to_string(),
            entity_id: None,
            change_type: ChangeType::Create,
            before_value: None,
            after_value: serde_json::json!({"title_suffix": " | Site"}),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("beforeValue").is_none());
        assert!(json.get("entityId").is_none());
        assert_eq!(json["changeType"], "create");
    }
}
