//! JSON file collection shared by the file-backed stores
//!
//! Records are kept in insertion order, so the "first" record of a
//! collection is the one stored earliest.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Ordered records persisted as a pretty-printed JSON array
pub(crate) struct JsonCollection<T> {
    path: PathBuf,
    items: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open the collection, loading the file if it exists.
    ///
    /// A missing or empty file is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = load(&path).await?;
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Run a read-only closure over the records
    pub async fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let items = self.items.read().await;
        f(&items)
    }

    /// Mutate the records and persist them.
    ///
    /// The closure works on a copy; the in-memory state is only replaced once
    /// the file write succeeded.
    pub async fn write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let out = f(&mut next)?;
        persist(&self.path, &next).await?;
        *items = next;
        Ok(out)
    }
}

/// Remove every record selected by `in_scope` except the first one matching
/// `is_kept`, returning how many were removed
pub(crate) fn retain_first<T>(
    items: &mut Vec<T>,
    in_scope: impl Fn(&T) -> bool,
    is_kept: impl Fn(&T) -> bool,
) -> u64 {
    let before = items.len();
    let mut kept = false;
    items.retain(|item| {
        if !in_scope(item) {
            return true;
        }
        if !kept && is_kept(item) {
            kept = true;
            return true;
        }
        false
    });
    (before - items.len()) as u64
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content)
        .map_err(|e| Error::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

async fn persist<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(items)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, content).await.map_err(|e| {
        Error::Storage(format!("Failed to write {}: {}", path.display(), e))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
    }

    fn item(id: &str) -> Item {
        Item { id: id.to_string() }
    }

    #[tokio::test]
    async fn test_insertion_order_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("items.json");

        {
            let collection = JsonCollection::<Item>::open(&path).await.unwrap();
            collection
                .write(|items| {
                    items.push(item("b"));
                    items.push(item("a"));
                    Ok(())
                })
                .await
                .unwrap();
        }

        let collection = JsonCollection::<Item>::open(&path).await.unwrap();
        let ids = collection
            .read(|items| items.iter().map(|i| i.id.clone()).collect::<Vec<_>>())
            .await;
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let collection = JsonCollection::<Item>::open(temp_dir.path().join("items.json"))
            .await
            .unwrap();

        let result: Result<()> = collection
            .write(|items| {
                items.push(item("x"));
                Err(Error::InvalidInput("rejected".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(collection.read(|items| items.len()).await, 0);
    }

    #[test]
    fn test_retain_first_drops_duplicate_ids() {
        let mut items = vec![item("1"), item("2"), item("1"), item("3")];

        let removed = retain_first(&mut items, |_| true, |i| i.id == "1");
        assert_eq!(removed, 3);
        assert_eq!(items, vec![item("1")]);
    }

    #[test]
    fn test_retain_first_leaves_out_of_scope_records() {
        let mut items = vec![item("a1"), item("a2"), item("b1")];

        let removed = retain_first(&mut items, |i| i.id.starts_with('a'), |i| i.id == "a2");
        assert_eq!(removed, 1);
        assert_eq!(items, vec![item("a2"), item("b1")]);
    }

    #[tokio::test]
    async fn test_empty_file_is_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        tokio::fs::write(&path, "   ").await.unwrap();

        let collection = JsonCollection::<Item>::open(&path).await.unwrap();
        assert_eq!(collection.read(|items| items.len()).await, 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        match JsonCollection::<Item>::open(&path).await {
            Err(Error::Storage(msg)) => assert!(msg.contains("Failed to parse")),
            Err(e) => panic!("Expected Storage error, got: {:?}", e),
            Ok(_) => panic!("Expected Storage error"),
        }
    }
}
