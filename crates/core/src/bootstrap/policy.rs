//! Default policy construction

use crate::common::{integer_to_semver, is_blank, new_entity_id};
use crate::config::Configuration;
use crate::organization::Organization;
use crate::policy::{Policy, DEFAULT_RETENTION_PERIOD_DAYS};
use crate::{Error, Result};

/// Policy URL from configuration, when it is not blank
pub(super) fn policy_url_override(config: &Configuration) -> Option<&str> {
    let url = config.policy.url.trim();
    (!url.is_empty()).then_some(url)
}

/// Build the organisation's first policy from configuration.
///
/// The jurisdiction is the organisation location and the URL defaults to
/// the organisation's policy URL unless configuration overrides it. Nothing
/// is stored here.
pub fn default_policy(config: &Configuration, organisation: &Organization) -> Result<Policy> {
    let url = policy_url_override(config)
        .map(str::to_string)
        .unwrap_or_else(|| organisation.policy_url.clone());

    let policy = Policy {
        id: new_entity_id(config.test_mode),
        name: config.policy.name.trim().to_string(),
        version: integer_to_semver(1),
        url,
        jurisdiction: organisation.location.clone(),
        industry_sector: config.policy.industry_sector.clone(),
        data_retention_period_days: DEFAULT_RETENTION_PERIOD_DAYS,
        geographic_restriction: config.policy.geographic_restriction.clone(),
        storage_location: config.policy.storage_location.clone(),
        third_party_data_sharing: true,
        organisation_id: organisation.id.clone(),
        is_deleted: false,
    };

    if is_blank(&policy.name) {
        return Err(Error::InvalidInput("policy.name cannot be empty".to_string()));
    }
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;

    fn config(url: &str) -> Configuration {
        Configuration {
            policy: PolicyConfig {
                name: "Default policy".to_string(),
                url: url.to_string(),
                industry_sector: "Retail".to_string(),
                geographic_restriction: "EU".to_string(),
                storage_location: "Sweden".to_string(),
            },
            test_mode: true,
            ..Configuration::default()
        }
    }

    fn organisation() -> Organization {
        Organization::new("org-1", "Acme", "type-1")
            .with_location("Sweden")
            .with_policy_url("https://acme.example.com/privacy")
    }

    #[test]
    fn test_default_policy_fields() {
        let policy = default_policy(&config(""), &organisation()).unwrap();

        assert_eq!(policy.id, "1");
        assert_eq!(policy.version, "1.0.0");
        assert_eq!(policy.data_retention_period_days, 1095);
        assert!(policy.third_party_data_sharing);
        assert!(!policy.is_deleted);
        assert_eq!(policy.jurisdiction, "Sweden");
        assert_eq!(policy.organisation_id, "org-1");
        assert_eq!(policy.industry_sector, "Retail");
        assert_eq!(policy.url, "https://acme.example.com/privacy");
    }

    #[test]
    fn test_blank_override_inherits_organisation_url() {
        let policy = default_policy(&config("   "), &organisation()).unwrap();
        assert_eq!(policy.url, "https://acme.example.com/privacy");
    }

    #[test]
    fn test_override_replaces_url() {
        let policy =
            default_policy(&config(" https://policy.example.com "), &organisation()).unwrap();
        assert_eq!(policy.url, "https://policy.example.com");
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut config = config("");
        config.policy.name = " ".to_string();
        assert!(matches!(
            default_policy(&config, &organisation()),
            Err(Error::InvalidInput(_))
        ));
    }
}
