//! Organisation module
//!
//! The organisation is the tenant root. Identity providers, webhooks,
//! policies and image assets all belong to exactly one organisation.

mod file_store;
mod model;
mod repository;

pub use file_store::FileOrganizationStore;
pub use model::*;
pub use repository::OrganizationRepository;
