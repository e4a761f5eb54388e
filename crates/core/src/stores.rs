//! File-backed stores the bootstrap and the API share

use std::path::Path;
use std::sync::Arc;

use crate::asset::{FileImageAssetLoader, ImageAssetLoader};
use crate::idp::{FileIdentityProviderStore, IdentityProviderRepository};
use crate::org_type::{FileOrgTypeStore, OrgTypeRepository};
use crate::organization::{FileOrganizationStore, OrganizationRepository};
use crate::policy::{FilePolicyStore, PolicyRepository};
use crate::revision::{FileRevisionStore, RevisionRepository};
use crate::user::{FileUserStore, UserRepository};
use crate::webhook::{FileWebhookStore, WebhookRepository};
use crate::Result;

/// Repositories injected into the bootstrap
#[derive(Clone)]
pub struct TenantStores {
    pub organizations: Arc<dyn OrganizationRepository>,
    pub org_types: Arc<dyn OrgTypeRepository>,
    pub users: Arc<dyn UserRepository>,
    pub policies: Arc<dyn PolicyRepository>,
    pub identity_providers: Arc<dyn IdentityProviderRepository>,
    pub webhooks: Arc<dyn WebhookRepository>,
    pub revisions: Arc<dyn RevisionRepository>,
    pub assets: Arc<dyn ImageAssetLoader>,
}

impl TenantStores {
    /// Open every store under `data_dir`; images are read from `assets_dir`
    pub async fn open(data_dir: &Path, assets_dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        Ok(Self {
            organizations: Arc::new(
                FileOrganizationStore::new(data_dir.join("organizations.json")).await?,
            ),
            org_types: Arc::new(FileOrgTypeStore::new(data_dir.join("org_types.json")).await?),
            users: Arc::new(FileUserStore::new(data_dir.join("users.json")).await?),
            policies: Arc::new(FilePolicyStore::new(data_dir.join("policies.json")).await?),
            identity_providers: Arc::new(
                FileIdentityProviderStore::new(data_dir.join("identity_providers.json")).await?,
            ),
            webhooks: Arc::new(FileWebhookStore::new(data_dir.join("webhooks.json")).await?),
            revisions: Arc::new(FileRevisionStore::new(data_dir.join("revisions")).await?),
            assets: Arc::new(
                FileImageAssetLoader::new(assets_dir, data_dir.join("images.json")).await?,
            ),
        })
    }
}
