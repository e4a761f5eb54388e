//! User repository trait

use async_trait::async_trait;

use super::model::{Role, User};
use crate::config::{IamConfig, UserConfig};
use crate::Result;

/// Interface of the user subsystem used by the bootstrap
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a new user from configuration
    async fn register_user(&self, user: &UserConfig, iam: &IamConfig) -> Result<User>;

    /// Get a user by ID, `Error::NotFound` if absent
    async fn get(&self, id: &str) -> Result<User>;

    /// Get a user by email (case-insensitive), `Error::NotFound` if absent
    async fn find_by_email(&self, email: &str) -> Result<User>;

    /// Grant a role; granting a role the user already holds is a no-op
    async fn add_role(&self, user_id: &str, role: Role) -> Result<User>;
}
