//! File-based webhook storage

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::Webhook;
use super::repository::WebhookRepository;
use crate::storage::JsonCollection;
use crate::{Error, Result};

pub struct FileWebhookStore {
    webhooks: JsonCollection<Webhook>,
}

impl FileWebhookStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            webhooks: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl WebhookRepository for FileWebhookStore {
    async fn count_by_organisation(&self, org_id: &str) -> Result<u64> {
        Ok(self
            .webhooks
            .read(|webhooks| {
                webhooks
                    .iter()
                    .filter(|w| w.organisation_id == org_id && !w.is_deleted)
                    .count() as u64
            })
            .await)
    }

    async fn create_webhook(&self, webhook: Webhook) -> Result<Webhook> {
        self.webhooks
            .write(|webhooks| {
                if webhooks.iter().any(|w| w.id == webhook.id) {
                    return Err(Error::InvalidInput(format!(
                        "Webhook with ID {} already exists",
                        webhook.id
                    )));
                }
                webhooks.push(webhook.clone());
                Ok(webhook)
            })
            .await
    }

    async fn list_by_organisation(&self, org_id: &str) -> Result<Vec<Webhook>> {
        Ok(self
            .webhooks
            .read(|webhooks| {
                webhooks
                    .iter()
                    .filter(|w| w.organisation_id == org_id && !w.is_deleted)
                    .cloned()
                    .collect()
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn webhook(id: &str, org_id: &str) -> Webhook {
        Webhook {
            id: id.to_string(),
            organisation_id: org_id.to_string(),
            payload_url: "https://hooks.example.com".to_string(),
            content_type: "application/json".to_string(),
            subscribed_events: vec!["consent.allowed".to_string()],
            disabled: false,
            secret_key: "hook-secret".to_string(),
            skip_ssl_verification: true,
            timestamp: "2024-05-01T09:30:00Z".to_string(),
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileWebhookStore::new(temp_dir.path().join("webhooks.json"))
            .await
            .unwrap();

        store.create_webhook(webhook("w1", "org-a")).await.unwrap();
        let mut deleted = webhook("w2", "org-a");
        deleted.is_deleted = true;
        store.create_webhook(deleted).await.unwrap();

        assert_eq!(store.count_by_organisation("org-a").await.unwrap(), 1);
        let listed = store.list_by_organisation("org-a").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "w1");
    }
}
