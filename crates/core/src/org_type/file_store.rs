//! File-based organisation type storage

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::OrgType;
use super::repository::OrgTypeRepository;
use crate::storage::{retain_first, JsonCollection};
use crate::{Error, Result};

pub struct FileOrgTypeStore {
    types: JsonCollection<OrgType>,
}

impl FileOrgTypeStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            types: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl OrgTypeRepository for FileOrgTypeStore {
    async fn get_first(&self) -> Result<OrgType> {
        self.types
            .read(|types| types.first().cloned())
            .await
            .ok_or_else(|| Error::NotFound("No organization type exists".to_string()))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.types.read(|types| types.len() as u64).await)
    }

    async fn add(&self, org_type: OrgType) -> Result<OrgType> {
        self.types
            .write(|types| {
                if types.iter().any(|t| t.id == org_type.id) {
                    return Err(Error::InvalidInput(format!(
                        "Organization type with ID {} already exists",
                        org_type.id
                    )));
                }
                types.push(org_type.clone());
                Ok(org_type)
            })
            .await
    }

    async fn delete_all_except(&self, keep_id: &str) -> Result<u64> {
        self.types
            .write(|types| Ok(retain_first(types, |_| true, |t| t.id == keep_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_add_and_get_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOrgTypeStore::new(temp_dir.path().join("org_types.json"))
            .await
            .unwrap();

        assert!(store.get_first().await.unwrap_err().is_not_found());

        store.add(OrgType::new("t1", "Retail")).await.unwrap();
        store.add(OrgType::new("t2", "Health")).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.get_first().await.unwrap().type_name, "Retail");
    }

    #[tokio::test]
    async fn test_delete_all_except_unknown_id_clears_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOrgTypeStore::new(temp_dir.path().join("org_types.json"))
            .await
            .unwrap();

        store.add(OrgType::new("t1", "Retail")).await.unwrap();
        assert_eq!(store.delete_all_except("other").await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
