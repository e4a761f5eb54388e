//! File-based identity provider storage

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::IdentityProvider;
use super::repository::IdentityProviderRepository;
use crate::storage::JsonCollection;
use crate::{Error, Result};

pub struct FileIdentityProviderStore {
    providers: JsonCollection<IdentityProvider>,
}

impl FileIdentityProviderStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            providers: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl IdentityProviderRepository for FileIdentityProviderStore {
    async fn count_by_organisation(&self, org_id: &str) -> Result<u64> {
        Ok(self
            .providers
            .read(|providers| {
                providers
                    .iter()
                    .filter(|p| p.organisation_id == org_id && !p.is_deleted)
                    .count() as u64
            })
            .await)
    }

    async fn add(&self, provider: IdentityProvider) -> Result<IdentityProvider> {
        self.providers
            .write(|providers| {
                if providers.iter().any(|p| p.id == provider.id) {
                    return Err(Error::InvalidInput(format!(
                        "Identity provider with ID {} already exists",
                        provider.id
                    )));
                }
                providers.push(provider.clone());
                Ok(provider)
            })
            .await
    }

    async fn list_by_organisation(&self, org_id: &str) -> Result<Vec<IdentityProvider>> {
        Ok(self
            .providers
            .read(|providers| {
                providers
                    .iter()
                    .filter(|p| p.organisation_id == org_id && !p.is_deleted)
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

    fn provider(id: &str, org_id: &str) -> IdentityProvider {
        IdentityProvider {
            id: id.to_string(),
            name: "Keycloak".to_string(),
            issuer_url: "https://iam.example.com/realms/consent".to_string(),
            authorization_url: String::new(),
            token_url: String::new(),
            logout_url: String::new(),
            client_id: "consent".to_string(),
            client_secret: "s3cret".to_string(),
            jwks_url: String::new(),
            user_info_url: String::new(),
            default_scope: "openid".to_string(),
            organisation_id: org_id.to_string(),
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_add_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("idps.json");
        let store = FileIdentityProviderStore::new(&path).await.unwrap();

        store.add(provider("i1", "org-a")).await.unwrap();
        assert_eq!(store.count_by_organisation("org-a").await.unwrap(), 1);
        assert_eq!(store.count_by_organisation("org-b").await.unwrap(), 0);

        let reopened = FileIdentityProviderStore::new(&path).await.unwrap();
        let listed = reopened.list_by_organisation("org-a").await.unwrap();
        assert_eq!(listed, vec![provider("i1", "org-a")]);
    }

    #[tokio::test]
    async fn test_duplicate_provider_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileIdentityProviderStore::new(temp_dir.path().join("idps.json"))
            .await
            .unwrap();

        store.add(provider("i1", "org-a")).await.unwrap();
        assert!(matches!(
            store.add(provider("i1", "org-a")).await,
            Err(Error::InvalidInput(_))
        ));
    }
}
