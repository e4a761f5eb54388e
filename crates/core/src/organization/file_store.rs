//! File-based organisation storage

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;

use super::model::Organization;
use super::repository::OrganizationRepository;
use crate::storage::{retain_first, JsonCollection};
use crate::{Error, Result};

/// Organisation store backed by a JSON file
pub struct FileOrganizationStore {
    organizations: JsonCollection<Organization>,
}

impl FileOrganizationStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            organizations: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl OrganizationRepository for FileOrganizationStore {
    async fn get_first(&self) -> Result<Organization> {
        self.organizations
            .read(|orgs| orgs.first().cloned())
            .await
            .ok_or_else(|| Error::NotFound("No organization exists".to_string()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.organizations.read(|orgs| orgs.len() as u64).await)
    }

    async fn add(&self, organization: Organization) -> Result<Organization> {
        self.organizations
            .write(|orgs| {
                if orgs.iter().any(|o| o.id == organization.id) {
                    return Err(Error::InvalidInput(format!(
                        "Organization with ID {} already exists",
                        organization.id
                    )));
                }
                orgs.push(organization.clone());
                Ok(organization)
            })
            .await
    }

    async fn update(&self, mut organization: Organization) -> Result<Organization> {
        organization.updated_at = Utc::now();
        self.organizations
            .write(|orgs| {
                let slot = orgs
                    .iter_mut()
                    .find(|o| o.id == organization.id)
                    .ok_or_else(|| {
                        Error::NotFound(format!("Organization {} not found", organization.id))
                    })?;
                *slot = organization.clone();
                Ok(organization)
            })
            .await
    }

    async fn delete_all_except(&self, keep_id: &str) -> Result<u64> {
        self.organizations
            .write(|orgs| Ok(retain_first(orgs, |_| true, |o| o.id == keep_id)))
            .await
    }
}
