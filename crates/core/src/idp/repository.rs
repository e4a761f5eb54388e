use async_trait::async_trait;

use super::model::IdentityProvider;
use crate::Result;

/// Repository interface for identity providers, scoped by organisation
#[async_trait]
pub trait IdentityProviderRepository: Send + Sync {
    async fn count_by_organisation(&self, org_id: &str) -> Result<u64>;

    async fn add(&self, provider: IdentityProvider) -> Result<IdentityProvider>;

    async fn list_by_organisation(&self, org_id: &str) -> Result<Vec<IdentityProvider>>;
}
