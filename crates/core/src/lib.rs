//! Core library for the single-tenant consent platform
//!
//! This crate contains:
//! - Tenant entities and their repositories (organisation, type, users,
//!   identity providers, webhooks, policies, revisions, image assets)
//! - JSON file stores implementing those repositories
//! - The single-tenant bootstrap run at startup

pub mod asset;
pub mod bootstrap;
pub mod common;
pub mod config;
pub mod error;
pub mod feature_flags;
pub mod idp;
pub mod org_type;
pub mod organization;
pub mod policy;
pub mod revision;
pub mod stores;
pub mod user;
pub mod webhook;

mod storage;

pub use config::Configuration;
pub use error::Error;
pub use stores::TenantStores;
pub type Result<T> = std::result::Result<T, Error>;
