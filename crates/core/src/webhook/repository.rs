use async_trait::async_trait;

use super::model::Webhook;
use crate::Result;

/// Repository interface for webhooks, scoped by organisation
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    async fn count_by_organisation(&self, org_id: &str) -> Result<u64>;

    async fn create_webhook(&self, webhook: Webhook) -> Result<Webhook>;

    async fn list_by_organisation(&self, org_id: &str) -> Result<Vec<Webhook>>;
}
