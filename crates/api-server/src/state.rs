//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use consent_core::TenantStores;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    stores: TenantStores,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new(stores: TenantStores, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(AppStateInner { stores, data_dir }),
        }
    }

    /// Get reference to the tenant stores
    pub fn stores(&self) -> &TenantStores {
        &self.inner.stores
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}
