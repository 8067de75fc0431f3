//! Caller roles and per-operation allow-lists.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of caller roles known to the settings subsystem.
///
/// Capability checks are explicit allow-lists on this enum rather than
/// string comparisons in handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    ContentManager,
    SeoManager,
    Guide,
}

impl Role {
    /// Global settings are writable by the site super administrator only.
    pub fn can_manage_global_settings(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Per-entity overrides are writable by the admin-tier content roles.
    pub fn can_edit_overrides(&self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::Admin | Role::ContentManager | Role::SeoManager
        )
    }

    /// Cache purges reach out to third-party platforms; same tier as
    /// override writes.
    pub fn can_purge(&self) -> bool {
        self.can_edit_overrides()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::ContentManager => "content_manager",
            Role::SeoManager => "seo_manager",
            Role::Guide => "guide",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "content_manager" => Ok(Role::ContentManager),
            "seo_manager" => Ok(Role::SeoManager),
            "guide" => Ok(Role::Guide),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_settings_allow_list() {
        assert!(Role::SuperAdmin.can_manage_global_settings());
        assert!(!Role::Admin.can_manage_global_settings());
        assert!(!Role::SeoManager.can_manage_global_settings());
        assert!(!Role::Guide.can_manage_global_settings());
    }

    #[test]
    fn test_override_allow_list() {
        assert!(Role::SuperAdmin.can_edit_overrides());
        assert!(Role::Admin.can_edit_overrides());
        assert!(Role::ContentManager.can_edit_overrides());
        assert!(Role::SeoManager.can_edit_overrides());
        assert!(!Role::Guide.can_edit_overrides());
    }

    #[test]
    fn test_purge_allow_list() {
        assert!(Role::SuperAdmin.can_purge());
        assert!(Role::Admin.can_purge());
        assert!(Role::ContentManager.can_purge());
        assert!(Role::SeoManager.can_purge());
        assert!(!Role::Guide.can_purge());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [
            Role::SuperAdmin,
            Role::Admin,
            Role::ContentManager,
            Role::SeoManager,
            Role::Guide,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_rename() {
        assert_eq!(
            serde_json::to_string(&Role::SeoManager).unwrap(),
            "\"seo_manager\""
        );
    }
}
