//! File-based user registry

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use uuid::Uuid;

use super::model::{Role, User};
use super::repository::UserRepository;
use crate::common::is_blank;
use crate::config::{IamConfig, UserConfig};
use crate::storage::JsonCollection;
use crate::{Error, Result};

pub struct FileUserStore {
    users: JsonCollection<User>,
}

impl FileUserStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            users: JsonCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl UserRepository for FileUserStore {
    async fn register_user(&self, user: &UserConfig, iam: &IamConfig) -> Result<User> {
        let email = normalize_email(&user.username)?;
        validate_password(&user.password)?;

        let name = if is_blank(&user.name) {
            email.clone()
        } else {
            user.name.trim().to_string()
        };
        let record = User {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            realm: iam.realm.clone(),
            password_hash: hash_password(&user.password),
            roles: Vec::new(),
            created_at: Utc::now(),
        };

        self.users
            .write(|users| {
                if users.iter().any(|u| u.email == record.email) {
                    return Err(Error::Conflict(format!(
                        "User '{}' already exists",
                        record.email
                    )));
                }
                users.push(record.clone());
                Ok(record)
            })
            .await
    }

    async fn get(&self, id: &str) -> Result<User> {
        self.users
            .read(|users| users.iter().find(|u| u.id == id).cloned())
            .await
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))
    }

    async fn find_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_email(email)?;
        self.users
            .read(|users| users.iter().find(|u| u.email == email).cloned())
            .await
            .ok_or_else(|| Error::NotFound(format!("User '{}' not found", email)))
    }

    async fn add_role(&self, user_id: &str, role: Role) -> Result<User> {
        self.users
            .write(|users| {
                let user = users
                    .iter_mut()
                    .find(|u| u.id == user_id)
                    .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;
                if !user.roles.contains(&role) {
                    user.roles.push(role);
                }
                Ok(user.clone())
            })
            .await
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return Err(Error::InvalidInput("Invalid email".to_string()));
    }
    Ok(normalized)
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(Error::InvalidInput(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn hash_password(password: &str) -> String {
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    format!(
        "v1${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::RoleKind;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileUserStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileUserStore::new(temp_dir.path().join("users.json"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    fn user_config(username: &str) -> UserConfig {
        UserConfig {
            username: username.to_string(),
            password: "verysecurepw".to_string(),
            name: String::new(),
        }
    }

    fn iam_config() -> IamConfig {
        IamConfig {
            realm: "consent".to_string(),
            ..IamConfig::default()
        }
    }

    fn digest_matches(stored_hash: &str, password: &str) -> bool {
        let parts: Vec<&str> = stored_hash.split('$').collect();
        let salt = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let expected = URL_SAFE_NO_PAD.decode(parts[2]).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(&salt);
        hasher.update(password.as_bytes());
        expected == hasher.finalize().as_slice()
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let (store, _temp) = create_test_store().await;

        let user = store
            .register_user(&user_config(" Admin@Example.com "), &iam_config())
            .await
            .unwrap();
        assert_eq!(user.email, "admin@example.com");
        assert_eq!(user.name, "admin@example.com");
        assert_eq!(user.realm, "consent");
        assert!(user.password_hash.starts_with("v1$"));
        assert!(digest_matches(&user.password_hash, "verysecurepw"));
        assert!(!digest_matches(&user.password_hash, "wrongpassword"));

        let fetched = store.get(&user.id).await.unwrap();
        assert_eq!(fetched.email, user.email);
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let (store, _temp) = create_test_store().await;

        store
            .register_user(&user_config("admin@example.com"), &iam_config())
            .await
            .unwrap();
        match store
            .register_user(&user_config("ADMIN@example.com"), &iam_config())
            .await
            .unwrap_err()
        {
            Error::Conflict(_) => {}
            e => panic!("Expected Conflict error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_find_by_email_normalizes() {
        let (store, _temp) = create_test_store().await;

        let user = store
            .register_user(&user_config("admin@example.com"), &iam_config())
            .await
            .unwrap();
        let found = store.find_by_email(" ADMIN@Example.com").await.unwrap();
        assert_eq!(found.id, user.id);
        assert!(store
            .find_by_email("other@example.com")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let (store, _temp) = create_test_store().await;

        let mut config = user_config("admin@example.com");
        config.password = "short".to_string();
        assert!(matches!(
            store.register_user(&config, &iam_config()).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_add_role_is_idempotent() {
        let (store, _temp) = create_test_store().await;

        let user = store
            .register_user(&user_config("admin@example.com"), &iam_config())
            .await
            .unwrap();
        store.add_role(&user.id, Role::admin("org-1")).await.unwrap();
        let updated = store.add_role(&user.id, Role::admin("org-1")).await.unwrap();

        assert_eq!(updated.roles.len(), 1);
        assert!(updated.has_role(RoleKind::Admin, "org-1"));
        assert!(!updated.has_role(RoleKind::Admin, "org-2"));
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let (store, _temp) = create_test_store().await;
        assert!(store.get("missing").await.unwrap_err().is_not_found());
        assert!(store
            .add_role("missing", Role::admin("org-1"))
            .await
            .unwrap_err()
            .is_not_found());
    }
}
