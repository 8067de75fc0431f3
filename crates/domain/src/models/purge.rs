//! Per-platform cache purge outcomes.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Outcome of one platform's purge attempt.
///
/// Purging is heterogeneous by nature: a platform either exposes a scrape
/// API (success carries its response), or only a manual debugger (the entry
/// carries instructions), or the call failed outright. Never a single
/// pass/fail for the whole request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PurgeOutcome {
    Success {
        data: serde_json::Value,
    },
    Manual {
        message: String,
        #[serde(rename = "debugUrl")]
        debug_url: String,
    },
    Failed {
        error: String,
    },
}

/// Request body for `POST /settings/purge`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    #[validate(url)]
    pub url: String,
}
