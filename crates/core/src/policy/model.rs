//! Policy model definitions

use serde::{Deserialize, Serialize};

/// Retention period applied to a newly bootstrapped policy: three years
pub const DEFAULT_RETENTION_PERIOD_DAYS: u32 = 1095;

/// Data-handling policy of an organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub version: String,
    pub url: String,
    pub jurisdiction: String,
    pub industry_sector: String,
    pub data_retention_period_days: u32,
    pub geographic_restriction: String,
    pub storage_location: String,
    pub third_party_data_sharing: bool,
    pub organisation_id: String,
    #[serde(default)]
    pub is_deleted: bool,
}
