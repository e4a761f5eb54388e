use serde::{Deserialize, Serialize};

/// Textual UTC format of `Webhook::timestamp`, e.g. `2024-05-01T09:30:00Z`
pub const WEBHOOK_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Webhook subscription of an organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub organisation_id: String,
    pub payload_url: String,
    pub content_type: String,
    pub subscribed_events: Vec<String>,
    pub disabled: bool,
    pub secret_key: String,
    pub skip_ssl_verification: bool,
    pub timestamp: String,
    #[serde(default)]
    pub is_deleted: bool,
}
