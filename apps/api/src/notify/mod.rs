/// Downstream notification: forwards a saved profile's parsed JSON to the
/// external ML consumer. The pipeline treats every call as best-effort; this
/// client only reports failures, it never decides what to do with them.
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::models::profile::Profile;

#[async_trait]
pub trait ProfileNotifier: Send + Sync {
    async fn profile_saved(&self, profile: &Profile) -> Result<()>;
}

/// HTTP notifier. No request timeout or retry is configured; calls are
/// bounded by the client's own defaults.
pub struct HttpProfileNotifier {
    client: Client,
    endpoint: String,
}

impl HttpProfileNotifier {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ProfileNotifier for HttpProfileNotifier {
    async fn profile_saved(&self, profile: &Profile) -> Result<()> {
        // The consumer wants the parsed JSON as a structure, not a string.
        let parsed_json: Value =
            serde_json::from_str(&profile.profile_json).unwrap_or_else(|_| json!({}));

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "resume_id": profile.id,
                "parsed_json": parsed_json,
            }))
            .send()
            .await
            .context("downstream notification request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("downstream consumer returned status {status}");
        }

        debug!("notified downstream consumer for profile {}", profile.id);
        Ok(())
    }
}
