use async_trait::async_trait;

use super::model::OrgType;
use crate::Result;

/// Repository interface for organisation type storage
#[async_trait]
pub trait OrgTypeRepository: Send + Sync {
    /// The earliest stored type, `Error::NotFound` if there is none
    async fn get_first(&self) -> Result<OrgType>;

    async fn count(&self) -> Result<u64>;

    async fn add(&self, org_type: OrgType) -> Result<OrgType>;

    /// Delete every type except `keep_id`, returning how many were removed
    async fn delete_all_except(&self, keep_id: &str) -> Result<u64>;
}
