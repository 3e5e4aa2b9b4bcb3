use accord_types::Snowflake;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. `https://discord.com/api/v10`).
    pub api_base_url: String,
    /// Bot token sent as `Authorization: Bot <token>`.
    pub token: Option<String>,
    /// Application id. Learned from READY when unset.
    pub application_id: Option<Snowflake>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Upper bound on cached messages. `None` keeps every message.
    pub max_cached_messages: Option<usize>,
    /// How long deletions are remembered, in milliseconds.
    pub tombstone_horizon_ms: u64,
    /// Whether diagnostics are forwarded to the event sink.
    pub emit_debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://discord.com/api/v10".to_string(),
            token: None,
            application_id: None,
            request_timeout_ms: 30_000,
            max_cached_messages: Some(200),
            tombstone_horizon_ms: 300_000,
            emit_debug: true,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn tombstone_horizon(&self) -> Duration {
        Duration::from_millis(self.tombstone_horizon_ms)
    }
}
