//! User module
//!
//! Local user registry: registration of the organisation admin and role
//! bindings scoped to an organisation.

mod file_store;
mod model;
mod repository;

pub use file_store::FileUserStore;
pub use model::*;
pub use repository::UserRepository;
