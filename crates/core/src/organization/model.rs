//! Organisation model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::RoleKind;

/// A user bound to the organisation with an administrative role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAdmin {
    pub user_id: String,
    pub role: RoleKind,
}

/// The single tenant of the deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub type_id: String,
    pub location: String,
    pub description: String,
    pub policy_url: String,
    #[serde(default)]
    pub admins: Vec<OrganizationAdmin>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new organisation of the given type
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            type_id: type_id.into(),
            location: String::new(),
            description: String::new(),
            policy_url: String::new(),
            admins: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the location, used as the jurisdiction of its policies
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the policy URL
    pub fn with_policy_url(mut self, policy_url: impl Into<String>) -> Self {
        self.policy_url = policy_url.into();
        self
    }

    /// Bind a user as organisation admin
    pub fn with_admin(mut self, user_id: impl Into<String>) -> Self {
        self.admins.push(OrganizationAdmin {
            user_id: user_id.into(),
            role: RoleKind::Admin,
        });
        self
    }

    /// The first bound admin, if any
    pub fn first_admin(&self) -> Option<&OrganizationAdmin> {
        self.admins.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_organization() {
        let org = Organization::new("1", "Acme", "type-1");
        assert_eq!(org.name, "Acme");
        assert_eq!(org.type_id, "type-1");
        assert!(org.admins.is_empty());
        assert!(org.first_admin().is_none());
    }

    #[test]
    fn test_organization_with_admin() {
        let org = Organization::new("1", "Acme", "type-1")
            .with_location("Sweden")
            .with_admin("user-1");

        assert_eq!(org.location, "Sweden");
        let admin = org.first_admin().unwrap();
        assert_eq!(admin.user_id, "user-1");
        assert_eq!(admin.role, RoleKind::Admin);
    }
}
