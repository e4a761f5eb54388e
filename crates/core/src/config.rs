//! Static single-tenant configuration
//!
//! Loaded once from a JSON file at startup. Each section feeds exactly one
//! bootstrapped entity.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::is_blank;
use crate::{Error, Result};

/// Organisation administrator credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserConfig {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Identity and access management settings used when registering users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IamConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    pub timeout_secs: u64,
}

/// Default data-handling policy metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    pub name: String,
    pub url: String,
    pub industry_sector: String,
    pub geographic_restriction: String,
    pub storage_location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationConfig {
    pub name: String,
    pub location: String,
    pub description: String,
    pub policy_url: String,
}

/// OAuth2 / OpenID Connect provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdpConfig {
    pub name: String,
    pub issuer_url: String,
    pub authorization_url: String,
    pub token_url: String,
    pub logout_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub jwks_url: String,
    pub user_info_url: String,
    pub default_scope: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookConfig {
    pub payload_url: String,
    pub content_type: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhooksConfig {
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub user: UserConfig,
    pub iam: IamConfig,
    pub policy: PolicyConfig,
    pub organization: OrganizationConfig,
    pub idp: IdpConfig,
    pub webhook: WebhookConfig,
    pub webhooks: WebhooksConfig,
    pub test_mode: bool,
}

impl Configuration {
    /// Read and validate the configuration file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to read configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the bootstrap cannot build a tenant from
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.user.username) {
            return Err(Error::InvalidInput(
                "user.username cannot be empty".to_string(),
            ));
        }
        if is_blank(&self.user.password) {
            return Err(Error::InvalidInput(
                "user.password cannot be empty".to_string(),
            ));
        }
        if is_blank(&self.organization.name) {
            return Err(Error::InvalidInput(
                "organization.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Override test mode, e.g. from `CONSENT_TEST_MODE`
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "user": { "username": "admin@example.com", "password": "verysecurepw" },
        "iam": { "url": "https://iam.example.com", "realm": "consent" },
        "policy": { "name": "Default policy", "industrySector": "Retail" },
        "organization": { "name": "Acme", "location": "Sweden" },
        "idp": { "name": "Acme IdP", "clientSecret": "s3cret" },
        "webhook": { "payloadUrl": "https://hooks.example.com" },
        "webhooks": { "events": ["consent.allowed", "consent.disallowed"] },
        "testMode": true
    }"#;

    #[tokio::test]
    async fn test_load_configuration_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let config = Configuration::load(&path).await.unwrap();
        assert!(config.test_mode);
        assert_eq!(config.user.username, "admin@example.com");
        assert_eq!(config.policy.industry_sector, "Retail");
        assert_eq!(config.idp.client_secret, "s3cret");
        assert_eq!(config.webhooks.events.len(), 2);
        // Missing fields fall back to defaults
        assert_eq!(config.policy.url, "");
        assert_eq!(config.iam.timeout_secs, 0);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Configuration::load(temp_dir.path().join("absent.json")).await;
        match result {
            Err(Error::Storage(msg)) => assert!(msg.contains("Failed to read configuration")),
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_admin() {
        let mut config: Configuration = serde_json::from_str(SAMPLE).unwrap();
        config.user.username = "  ".to_string();

        match config.validate() {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("username")),
            other => panic!("Expected InvalidInput error, got: {:?}", other),
        }
    }

    #[test]
    fn test_with_test_mode_override() {
        let config: Configuration = serde_json::from_str(SAMPLE).unwrap();
        assert!(!config.with_test_mode(false).test_mode);
    }
}
