//! Preview-cache purge orchestrator.
//!
//! Asks third-party platforms to drop their cached share preview for a URL.
//! Facebook exposes a real re-scrape API; every other platform only offers a
//! manual debugger, so those entries carry instructions instead. Each
//! platform resolves independently: one timeout or API error degrades only
//! that platform's entry, never the whole response.

use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

use domain::models::PurgeOutcome;

use crate::config::PurgeConfig;

/// Facebook's crawler also serves WhatsApp previews.
const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/";
const FACEBOOK_DEBUGGER_URL: &str = "https://developers.facebook.com/tools/debug/";

pub struct PurgeService {
    client: Client,
    facebook_access_token: Option<String>,
}

impl PurgeService {
    pub fn new(config: &PurgeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        let facebook_access_token = if config.facebook_access_token.is_empty() {
            None
        } else {
            Some(config.facebook_access_token.clone())
        };

        Self {
            client,
            facebook_access_token,
        }
    }

    /// Attempt a purge for one URL across all known platforms.
    pub async fn purge_all(&self, url: &str) -> BTreeMap<String, PurgeOutcome> {
        let mut outcomes = BTreeMap::new();

        outcomes.insert("facebook".to_string(), self.purge_facebook(url).await);
        outcomes.insert(
            "twitter".to_string(),
            manual(
                "Twitter re-fetches cards on demand; paste the URL into the card validator.",
                "https://cards-dev.twitter.com/validator",
            ),
        );
        outcomes.insert(
            "linkedin".to_string(),
            manual(
                "Run the URL through the LinkedIn Post Inspector to refresh its cache.",
                &format!("https://www.linkedin.com/post-inspector/inspect/{}", url),
            ),
        );
        outcomes.insert(
            "whatsapp".to_string(),
            manual(
                "WhatsApp previews come from Facebook's crawler; re-scrape via the sharing debugger.",
                &format!("{}?q={}", FACEBOOK_DEBUGGER_URL, url),
            ),
        );
        outcomes.insert(
            "telegram".to_string(),
            manual(
                "Send the URL to @WebpageBot on Telegram to refresh the link preview.",
                "https://t.me/WebpageBot",
            ),
        );
        outcomes.insert(
            "google".to_string(),
            manual(
                "Request re-indexing through Google Search Console.",
                "https://search.google.com/search-console",
            ),
        );

        outcomes
    }

    /// Facebook re-scrape through the Graph API when a token is configured;
    /// manual sharing-debugger instructions otherwise.
    async fn purge_facebook(&self, url: &str) -> PurgeOutcome {
        let Some(token) = &self.facebook_access_token else {
            return manual(
                "No Graph API token configured; re-scrape via the sharing debugger.",
                &format!("{}?q={}", FACEBOOK_DEBUGGER_URL, url),
            );
        };

        let result = self
            .client
            .post(FACEBOOK_GRAPH_URL)
            .query(&[("id", url), ("scrape", "true"), ("access_token", token)])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let data = response
                    .json::<serde_json::Value>()
                    .await
                    .unwrap_or(serde_json::Value::Null);
                info!(url = %url, "Facebook re-scrape succeeded");
                PurgeOutcome::Success { data }
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(url = %url, status = %status, "Facebook re-scrape rejected");
                PurgeOutcome::Failed {
                    error: format!("Graph API returned {}: {}", status, body),
                }
            }
            Err(err) => {
                warn!(url = %url, error = %err, "Facebook re-scrape failed");
                PurgeOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}

fn manual(message: &str, debug_url: &str) -> PurgeOutcome {
    PurgeOutcome::Manual {
        message: message.to_string(),
        debug_url: debug_url.to_string(),
    }
}
