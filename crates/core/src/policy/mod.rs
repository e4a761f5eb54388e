//! Data-handling policy module

mod file_store;
mod model;
mod repository;

pub use file_store::FilePolicyStore;
pub use model::*;
pub use repository::PolicyRepository;
