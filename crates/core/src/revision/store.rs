use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;
use tracing::warn;

use super::types::{Revision, POLICY_SCHEMA};
use crate::policy::Policy;
use crate::{Error, Result};

/// Interface of the revision subsystem
#[async_trait]
pub trait RevisionRepository: Send + Sync {
    /// Record a new revision of `policy` attributed to `actor_id`
    async fn update_revision_for_policy(&self, policy: &Policy, actor_id: &str)
        -> Result<Revision>;

    /// Revisions of one object, oldest first
    async fn list_for_object(&self, schema_name: &str, object_id: &str) -> Result<Vec<Revision>>;
}

/// Revision log stored as JSON lines
pub struct FileRevisionStore {
    revisions_path: PathBuf,
    revisions: RwLock<Vec<Revision>>,
}

impl FileRevisionStore {
    pub async fn new(root_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root_dir).await?;
        let revisions_path = root_dir.join("revisions.jsonl");

        if fs::metadata(&revisions_path).await.is_err() {
            fs::File::create(&revisions_path).await?;
        }

        let revisions = Self::load_revisions(&revisions_path).await?;
        Ok(Self {
            revisions_path,
            revisions: RwLock::new(revisions),
        })
    }

    async fn load_revisions(path: &Path) -> Result<Vec<Revision>> {
        let file = fs::File::open(path).await?;
        let mut reader = BufReader::new(file).lines();
        let mut revisions = Vec::new();

        while let Some(line) = reader.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Revision>(&line) {
                Ok(revision) => revisions.push(revision),
                Err(err) => warn!(
                    "Ignoring malformed revision in {}: {}",
                    path.display(),
                    err
                ),
            }
        }

        Ok(revisions)
    }

    async fn append_line(&self, revision: &Revision) -> Result<()> {
        let encoded = serde_json::to_string(revision)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.revisions_path)
            .await
            .map_err(|err| Error::Storage(format!("Failed to open revision log: {}", err)))?;

        file.write_all(encoded.as_bytes())
            .await
            .map_err(|err| Error::Storage(format!("Failed to write revision log: {}", err)))?;
        file.write_all(b"\n").await.map_err(|err| {
            Error::Storage(format!("Failed to finalize revision log line: {}", err))
        })?;
        file.flush()
            .await
            .map_err(|err| Error::Storage(format!("Failed to flush revision log: {}", err)))?;
        Ok(())
    }
}

#[async_trait]
impl RevisionRepository for FileRevisionStore {
    async fn update_revision_for_policy(
        &self,
        policy: &Policy,
        actor_id: &str,
    ) -> Result<Revision> {
        // Hold the write lock across lookup and append so the chain stays linear
        let mut revisions = self.revisions.write().await;
        let predecessor = revisions
            .iter()
            .rev()
            .find(|r| r.schema_name == POLICY_SCHEMA && r.object_id == policy.id);
        let revision = Revision::for_policy(policy, actor_id, predecessor)?;

        self.append_line(&revision).await?;
        revisions.push(revision.clone());
        Ok(revision)
    }

    async fn list_for_object(&self, schema_name: &str, object_id: &str) -> Result<Vec<Revision>> {
        let revisions = self.revisions.read().await;
        Ok(revisions
            .iter()
            .filter(|r| r.schema_name == schema_name && r.object_id == object_id)
            .cloned()
            .collect())
    }
}
