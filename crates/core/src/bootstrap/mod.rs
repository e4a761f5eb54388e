//! Single-tenant bootstrap
//!
//! Runs once at process startup and makes sure the deployment holds exactly
//! one organisation with its type, admin, identity provider, webhook and
//! default policy. Every creation is guarded by an existence check or a
//! count, so running it again against bootstrapped storage writes nothing.
//!
//! Steps run strictly in order:
//!
//! ```text
//! CleanupTypes -> CleanupOrgs -> ResolveAdmin -> ResolveOrgType
//!   -> ResolveOrganisation -> ProvisionIdp -> ProvisionWebhook
//!   -> [CleanupPolicies] -> LoadAssets -> ProvisionPolicy -> Done
//! ```
//!
//! Any step failing aborts the run with a [`BootstrapError`] naming the step,
//! except `LoadAssets`, whose failures are only logged. `CleanupPolicies`
//! runs only when [`BootstrapOptions::policy_cleanup`] is set.
//!
//! Organisation, type and admin are never updated once created; the only
//! mutation of an existing organisation is the policy URL patch done while
//! the default policy is created.

mod cleanup;
mod policy;
mod single_tenant;

pub use policy::default_policy;
pub use single_tenant::SingleTenantBootstrap;

use std::fmt;

use thiserror::Error;

use crate::feature_flags;

/// Bootstrap state, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    CleanupTypes,
    CleanupOrgs,
    ResolveAdmin,
    ResolveOrgType,
    ResolveOrganisation,
    ProvisionIdp,
    ProvisionWebhook,
    CleanupPolicies,
    LoadAssets,
    ProvisionPolicy,
    Done,
}

impl BootstrapStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CleanupTypes => "cleanup_types",
            Self::CleanupOrgs => "cleanup_orgs",
            Self::ResolveAdmin => "resolve_admin",
            Self::ResolveOrgType => "resolve_org_type",
            Self::ResolveOrganisation => "resolve_organisation",
            Self::ProvisionIdp => "provision_idp",
            Self::ProvisionWebhook => "provision_webhook",
            Self::CleanupPolicies => "cleanup_policies",
            Self::LoadAssets => "load_assets",
            Self::ProvisionPolicy => "provision_policy",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal bootstrap failure
#[derive(Debug, Error)]
#[error("Bootstrap failed at {step}: {source}")]
pub struct BootstrapError {
    pub step: BootstrapStep,
    #[source]
    pub source: crate::Error,
}

pub(crate) trait StepResultExt<T> {
    fn at(self, step: BootstrapStep) -> Result<T, BootstrapError>;
}

impl<T> StepResultExt<T> for crate::Result<T> {
    fn at(self, step: BootstrapStep) -> Result<T, BootstrapError> {
        self.map_err(|source| BootstrapError { step, source })
    }
}

/// Switches for optional bootstrap behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapOptions {
    /// Keep only the first policy of the organisation before provisioning
    pub policy_cleanup: bool,
}

impl BootstrapOptions {
    pub fn from_env() -> Self {
        Self {
            policy_cleanup: feature_flags::feature_policy_cleanup(),
        }
    }
}

/// Outcome of a resolve step: the entity and whether this run created it
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub created: bool,
}

impl<T> Resolved<T> {
    pub(crate) fn existing(value: T) -> Self {
        Self {
            value,
            created: false,
        }
    }

    pub(crate) fn created(value: T) -> Self {
        Self {
            value,
            created: true,
        }
    }
}

/// Result of a bootstrap run
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    pub admin_id: String,
    pub org_type_id: String,
    pub organization_id: String,

    pub admin_created: bool,
    pub org_type_created: bool,
    pub organization_created: bool,
    pub identity_provider_created: bool,
    pub webhook_created: bool,
    pub policy_created: bool,

    pub removed_org_types: u64,
    pub removed_organizations: u64,
    pub removed_policies: u64,
    pub assets_loaded: usize,
}

impl BootstrapReport {
    /// Whether the run created any tenant entity
    pub fn created_anything(&self) -> bool {
        self.admin_created
            || self.org_type_created
            || self.organization_created
            || self.identity_provider_created
            || self.webhook_created
            || self.policy_created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_error_names_the_step() {
        let result: crate::Result<()> = Err(Error::Storage("disk full".to_string()));
        let err = result.at(BootstrapStep::ProvisionWebhook).unwrap_err();

        assert_eq!(err.step, BootstrapStep::ProvisionWebhook);
        assert_eq!(
            err.to_string(),
            "Bootstrap failed at provision_webhook: Storage error: disk full"
        );
    }

    #[test]
    fn test_report_created_anything() {
        let mut report = BootstrapReport::default();
        assert!(!report.created_anything());

        report.webhook_created = true;
        assert!(report.created_anything());
    }
}
