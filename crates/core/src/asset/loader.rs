//! Image asset loading from the file system

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use super::model::{ImageAsset, ImageKind};
use crate::storage::JsonCollection;
use crate::{Error, Result};

#[async_trait]
pub trait ImageAssetLoader: Send + Sync {
    /// Load the logo and cover images for `org_id`, skipping kinds it already
    /// has. Returns how many images were stored.
    async fn load_image_assets_for_single_tenant_configuration(&self, org_id: &str)
        -> Result<usize>;

    async fn list_for_organisation(&self, org_id: &str) -> Result<Vec<ImageAsset>>;
}

/// Reads images from `assets_dir` and keeps base64 copies in a JSON file
pub struct FileImageAssetLoader {
    assets_dir: PathBuf,
    images: JsonCollection<ImageAsset>,
}

impl FileImageAssetLoader {
    pub async fn new(assets_dir: impl Into<PathBuf>, store_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            assets_dir: assets_dir.into(),
            images: JsonCollection::open(store_path).await?,
        })
    }

    async fn read_image(&self, kind: ImageKind) -> Result<Vec<u8>> {
        let path = self.assets_dir.join(kind.file_name());
        tokio::fs::read(&path).await.map_err(|e| {
            Error::Storage(format!("Failed to read image {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl ImageAssetLoader for FileImageAssetLoader {
    async fn load_image_assets_for_single_tenant_configuration(
        &self,
        org_id: &str,
    ) -> Result<usize> {
        let present: Vec<ImageKind> = self
            .images
            .read(|images| {
                images
                    .iter()
                    .filter(|i| i.organisation_id == org_id)
                    .map(|i| i.kind)
                    .collect()
            })
            .await;

        let mut loaded = Vec::new();
        for kind in ImageKind::ALL {
            if present.contains(&kind) {
                debug!(org_id, kind = kind.file_name(), "Image asset already loaded");
                continue;
            }
            let bytes = self.read_image(kind).await?;
            loaded.push(ImageAsset {
                id: Uuid::new_v4().to_string(),
                organisation_id: org_id.to_string(),
                kind,
                content_type: "image/jpeg".to_string(),
                data: STANDARD.encode(bytes),
            });
        }

        if loaded.is_empty() {
            return Ok(0);
        }
        self.images
            .write(|images| {
                let count = loaded.len();
                images.extend(loaded);
                Ok(count)
            })
            .await
    }

    async fn list_for_organisation(&self, org_id: &str) -> Result<Vec<ImageAsset>> {
        Ok(self
            .images
            .read(|images| {
                images
                    .iter()
                    .filter(|i| i.organisation_id == org_id)
                    .cloned()
                    .collect()
            })
            .await)
    }
}
