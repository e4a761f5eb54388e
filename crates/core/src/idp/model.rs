use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    pub id: String,
    pub name: String,
    pub issuer_url: String,
    pub authorization_url: String,
    pub token_url: String,
    pub logout_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub jwks_url: String,
    pub user_info_url: String,
    pub default_scope: String,
    pub organisation_id: String,
    #[serde(default)]
    pub is_deleted: bool,
}
