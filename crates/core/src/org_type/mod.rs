//! Organisation type module

mod file_store;
mod model;
mod repository;

pub use file_store::FileOrgTypeStore;
pub use model::*;
pub use repository::OrgTypeRepository;
