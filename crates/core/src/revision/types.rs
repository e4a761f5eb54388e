use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::policy::Policy;
use crate::Result;

pub const POLICY_SCHEMA: &str = "policy";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub schema_name: String,
    pub object_id: String,
    pub timestamp: DateTime<Utc>,
    pub authorized_by_individual_id: String,
    pub serialized_snapshot: String,
    pub serialized_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor_revision_id: Option<String>,
}

impl Revision {
    /// Snapshot `policy` as changed by `actor_id`, chained to `predecessor`
    pub fn for_policy(
        policy: &Policy,
        actor_id: impl Into<String>,
        predecessor: Option<&Revision>,
    ) -> Result<Self> {
        let serialized_snapshot = serde_json::to_string(policy)?;
        let serialized_hash = hex::encode(Sha256::digest(serialized_snapshot.as_bytes()));

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            schema_name: POLICY_SCHEMA.to_string(),
            object_id: policy.id.clone(),
            timestamp: Utc::now(),
            authorized_by_individual_id: actor_id.into(),
            serialized_snapshot,
            serialized_hash,
            predecessor_hash: predecessor.map(|p| p.serialized_hash.clone()),
            predecessor_revision_id: predecessor.map(|p| p.id.clone()),
        })
    }
}
