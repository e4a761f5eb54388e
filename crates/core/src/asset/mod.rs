//! Image assets of the single-tenant organisation

mod loader;
mod model;

pub use loader::{FileImageAssetLoader, ImageAssetLoader};
pub use model::*;
