//! Small helpers shared by the models and the bootstrap

use uuid::Uuid;

/// Identifier used for every bootstrap-built entity in test mode
pub const TEST_MODE_ID: &str = "1";

/// New entity identifier: fixed in test mode so outputs can be compared
pub fn new_entity_id(test_mode: bool) -> String {
    if test_mode {
        TEST_MODE_ID.to_string()
    } else {
        Uuid::new_v4().to_string()
    }
}

/// Render an integer revision as a semantic version, `1` -> `"1.0.0"`
pub fn integer_to_semver(version: u64) -> String {
    format!("{}.0.0", version)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
