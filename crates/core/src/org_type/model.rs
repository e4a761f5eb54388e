use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of the organisation, derived from the policy industry sector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgType {
    pub id: String,
    pub type_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrgType {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            image_url: None,
            created_at: Utc::now(),
        }
    }
}
