//! File-based policy storage

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::Policy;
use super::repository::PolicyRepository;
use crate::storage::{retain_first, JsonCollection};
use crate::{Error, Result};

/// Policy store backed by a JSON file. Soft-deleted policies are ignored by
/// lookups and counts.
pub struct FilePolicyStore {
    policies: JsonCollection<Policy>,
}

impl FilePolicyStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            policies: JsonCollection::open(path).await?,
        })
    }
}

fn is_live(policy: &Policy, org_id: &str) -> bool {
    policy.organisation_id == org_id && !policy.is_deleted
}

#[async_trait]
impl PolicyRepository for FilePolicyStore {
    async fn get_first_by_organisation(&self, org_id: &str) -> Result<Policy> {
        self.policies
            .read(|policies| policies.iter().find(|p| is_live(p, org_id)).cloned())
            .await
            .ok_or_else(|| {
                Error::NotFound(format!("No policy exists for organization {}", org_id))
            })
    }

    async fn count_by_organisation(&self, org_id: &str) -> Result<u64> {
        Ok(self
            .policies
            .read(|policies| policies.iter().filter(|p| is_live(p, org_id)).count() as u64)
            .await)
    }

    async fn add(&self, policy: Policy) -> Result<Policy> {
        self.policies
            .write(|policies| {
                if policies.iter().any(|p| p.id == policy.id) {
                    return Err(Error::InvalidInput(format!(
                        "Policy with ID {} already exists",
                        policy.id
                    )));
                }
                policies.push(policy.clone());
                Ok(policy)
            })
            .await
    }

    async fn delete_all_except(&self, org_id: &str, keep_id: &str) -> Result<u64> {
        self.policies
            .write(|policies| {
                Ok(retain_first(
                    policies,
                    |p| p.organisation_id == org_id,
                    |p| p.id == keep_id,
                ))
            })
            .await
    }
}
