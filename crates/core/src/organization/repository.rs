//! Organisation repository trait

use async_trait::async_trait;

use super::model::Organization;
use crate::Result;

/// Repository interface for organisation storage
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// The earliest stored organisation, `Error::NotFound` if there is none
    async fn get_first(&self) -> Result<Organization>;

    /// Number of stored organisations
    async fn count(&self) -> Result<u64>;

    /// Store a new organisation
    async fn add(&self, organization: Organization) -> Result<Organization>;

    /// Replace an existing organisation
    async fn update(&self, organization: Organization) -> Result<Organization>;

    /// Delete every organisation except the first one with `keep_id`,
    /// returning how many were removed
    async fn delete_all_except(&self, keep_id: &str) -> Result<u64>;
}
