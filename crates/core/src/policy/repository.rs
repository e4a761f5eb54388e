use async_trait::async_trait;

use super::model::Policy;
use crate::Result;

/// Repository interface for policies, scoped by organisation
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// The organisation's earliest stored policy, `Error::NotFound` if none
    async fn get_first_by_organisation(&self, org_id: &str) -> Result<Policy>;

    async fn count_by_organisation(&self, org_id: &str) -> Result<u64>;

    async fn add(&self, policy: Policy) -> Result<Policy>;

    /// Delete the organisation's policies except `keep_id`
    async fn delete_all_except(&self, org_id: &str, keep_id: &str) -> Result<u64>;
}
