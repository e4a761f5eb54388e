//! Identity provider module
//!
//! External OAuth2 / OpenID Connect providers trusted by an organisation.

mod file_store;
mod model;
mod repository;

pub use file_store::FileIdentityProviderStore;
pub use model::*;
pub use repository::IdentityProviderRepository;
