//! User and role model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Admin,
}

/// A role held by a user within one organisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role: RoleKind,
    pub org_id: String,
}

impl Role {
    pub fn admin(org_id: impl Into<String>) -> Self {
        Self {
            role: RoleKind::Admin,
            org_id: org_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub realm: String,
    pub password_hash: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user holds `role` in organisation `org_id`
    pub fn has_role(&self, role: RoleKind, org_id: &str) -> bool {
        self.roles
            .iter()
            .any(|r| r.role == role && r.org_id == org_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_snake_case() {
        let role = Role::admin("org-1");
        let json = serde_json::to_value(&role).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["orgId"], "org-1");
    }
}
