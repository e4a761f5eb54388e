//! Single-tenant bootstrap orchestration

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::cleanup::{remove_extra_org_types, remove_extra_organizations, remove_extra_policies};
use super::policy::{default_policy, policy_url_override};
use super::{
    BootstrapError, BootstrapOptions, BootstrapReport, BootstrapStep, Resolved, StepResultExt,
};
use crate::common::new_entity_id;
use crate::config::Configuration;
use crate::idp::IdentityProvider;
use crate::org_type::OrgType;
use crate::organization::Organization;
use crate::policy::Policy;
use crate::stores::TenantStores;
use crate::user::{Role, User};
use crate::webhook::{Webhook, WEBHOOK_TIMESTAMP_FORMAT};
use crate::Result;

/// Bootstraps the single tenant from static configuration
pub struct SingleTenantBootstrap {
    config: Configuration,
    stores: TenantStores,
    options: BootstrapOptions,
}

impl SingleTenantBootstrap {
    pub fn new(config: Configuration, stores: TenantStores) -> Self {
        Self {
            config,
            stores,
            options: BootstrapOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BootstrapOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every step in order, stopping at the first fatal failure
    #[instrument(skip(self), fields(test_mode = self.config.test_mode))]
    pub async fn run(&self) -> std::result::Result<BootstrapReport, BootstrapError> {
        info!("Starting single-tenant bootstrap");

        let removed_org_types = remove_extra_org_types(self.stores.org_types.as_ref())
            .await
            .at(BootstrapStep::CleanupTypes)?;
        let removed_organizations = remove_extra_organizations(self.stores.organizations.as_ref())
            .await
            .at(BootstrapStep::CleanupOrgs)?;

        let admin = self.resolve_admin().await.at(BootstrapStep::ResolveAdmin)?;
        let org_type = self
            .resolve_org_type()
            .await
            .at(BootstrapStep::ResolveOrgType)?;
        let organization = self
            .resolve_organisation(&org_type.value, &admin.value.id)
            .await
            .at(BootstrapStep::ResolveOrganisation)?;
        let org_id = organization.value.id.as_str();

        let identity_provider = self
            .ensure_identity_provider(org_id)
            .await
            .at(BootstrapStep::ProvisionIdp)?;
        let webhook = self
            .ensure_webhook(org_id)
            .await
            .at(BootstrapStep::ProvisionWebhook)?;

        let removed_policies = if self.options.policy_cleanup {
            remove_extra_policies(self.stores.policies.as_ref(), org_id)
                .await
                .at(BootstrapStep::CleanupPolicies)?
        } else {
            0
        };

        let assets_loaded = match self
            .stores
            .assets
            .load_image_assets_for_single_tenant_configuration(org_id)
            .await
        {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(
                    step = %BootstrapStep::LoadAssets,
                    error = %err,
                    "Error occurred while loading image assets for organization"
                );
                0
            }
        };

        let policy = self
            .ensure_default_policy(&organization.value, &admin.value.id)
            .await
            .at(BootstrapStep::ProvisionPolicy)?;

        let report = BootstrapReport {
            admin_id: admin.value.id,
            org_type_id: org_type.value.id,
            organization_id: organization.value.id.clone(),
            admin_created: admin.created,
            org_type_created: org_type.created,
            organization_created: organization.created,
            identity_provider_created: identity_provider.is_some(),
            webhook_created: webhook.is_some(),
            policy_created: policy.is_some(),
            removed_org_types,
            removed_organizations,
            removed_policies,
            assets_loaded,
        };

        info!(
            step = %BootstrapStep::Done,
            organization_id = %report.organization_id,
            created = report.created_anything(),
            "Single-tenant bootstrap complete"
        );
        Ok(report)
    }

    /// The organisation admin: the existing organisation's first admin, else
    /// the configured user, registering it when it does not exist yet
    #[instrument(skip(self))]
    pub async fn resolve_admin(&self) -> Result<Resolved<User>> {
        let organization = match self.stores.organizations.get_first().await {
            Ok(organization) => Some(organization),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(err),
        };

        if let Some(admin) = organization.as_ref().and_then(Organization::first_admin) {
            let user = self.stores.users.get(&admin.user_id).await?;
            debug!(user_id = %user.id, "Reusing organization admin");
            return Ok(Resolved::existing(user));
        }

        match self.stores.users.find_by_email(&self.config.user.username).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Reusing registered user as organization admin");
                return Ok(Resolved::existing(user));
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        info!("No organization admin found, registering new user");
        let user = self
            .stores
            .users
            .register_user(&self.config.user, &self.config.iam)
            .await?;
        info!(user_id = %user.id, "Organization admin registered");
        Ok(Resolved::created(user))
    }

    /// The first organisation type, created from the policy metadata if none exists
    #[instrument(skip(self))]
    pub async fn resolve_org_type(&self) -> Result<Resolved<OrgType>> {
        match self.stores.org_types.get_first().await {
            Ok(org_type) => Ok(Resolved::existing(org_type)),
            Err(err) if err.is_not_found() => {
                info!("Organization type doesn't exist, creating organization type");
                let org_type = OrgType::new(
                    new_entity_id(self.config.test_mode),
                    self.config.policy.industry_sector.clone(),
                );
                let org_type = self.stores.org_types.add(org_type).await?;
                Ok(Resolved::created(org_type))
            }
            Err(err) => Err(err),
        }
    }

    /// The first organisation, created and bound to `org_type` and `admin_id`
    /// if none exists. An existing organisation is returned unchanged.
    #[instrument(skip(self, org_type), fields(org_type_id = %org_type.id))]
    pub async fn resolve_organisation(
        &self,
        org_type: &OrgType,
        admin_id: &str,
    ) -> Result<Resolved<Organization>> {
        match self.stores.organizations.get_first().await {
            Ok(organization) => {
                let admin_matches = organization
                    .first_admin()
                    .is_some_and(|admin| admin.user_id == admin_id);
                if organization.type_id != org_type.id || !admin_matches {
                    info!(
                        organization_id = %organization.id,
                        "Organization already exists, ignoring configured admin and type"
                    );
                }
                Ok(Resolved::existing(organization))
            }
            Err(err) if err.is_not_found() => {
                info!("Organization doesn't exist, creating organization");
                let org_config = &self.config.organization;
                let organization = Organization::new(
                    new_entity_id(self.config.test_mode),
                    org_config.name.trim(),
                    org_type.id.clone(),
                )
                .with_location(org_config.location.clone())
                .with_description(org_config.description.clone())
                .with_policy_url(org_config.policy_url.trim())
                .with_admin(admin_id);
                let organization = self.stores.organizations.add(organization).await?;

                self.stores
                    .users
                    .add_role(admin_id, Role::admin(organization.id.clone()))
                    .await?;
                info!(organization_id = %organization.id, "Organization created");
                Ok(Resolved::created(organization))
            }
            Err(err) => Err(err),
        }
    }

    /// Create the organisation's identity provider unless it already has one.
    ///
    /// `None` means a provider existed and nothing was written.
    #[instrument(skip(self))]
    pub async fn ensure_identity_provider(&self, org_id: &str) -> Result<Option<IdentityProvider>> {
        let id = new_entity_id(self.config.test_mode);

        let existing = self
            .stores
            .identity_providers
            .count_by_organisation(org_id)
            .await?;
        if existing > 0 {
            debug!(existing, "Identity provider already configured");
            return Ok(None);
        }

        let idp = &self.config.idp;
        let provider = IdentityProvider {
            id,
            name: idp.name.clone(),
            issuer_url: idp.issuer_url.clone(),
            authorization_url: idp.authorization_url.clone(),
            token_url: idp.token_url.clone(),
            logout_url: idp.logout_url.clone(),
            client_id: idp.client_id.clone(),
            client_secret: idp.client_secret.clone(),
            jwks_url: idp.jwks_url.clone(),
            user_info_url: idp.user_info_url.clone(),
            default_scope: idp.default_scope.clone(),
            organisation_id: org_id.to_string(),
            is_deleted: false,
        };
        let provider = self.stores.identity_providers.add(provider).await?;
        info!(idp_id = %provider.id, "Identity provider created");
        Ok(Some(provider))
    }

    /// Create the organisation's webhook unless it already has one.
    ///
    /// `None` means a webhook existed and nothing was written.
    #[instrument(skip(self))]
    pub async fn ensure_webhook(&self, org_id: &str) -> Result<Option<Webhook>> {
        let id = new_entity_id(self.config.test_mode);

        let existing = self.stores.webhooks.count_by_organisation(org_id).await?;
        if existing > 0 {
            debug!(existing, "Webhook already configured");
            return Ok(None);
        }

        let webhook = Webhook {
            id,
            organisation_id: org_id.to_string(),
            payload_url: self.config.webhook.payload_url.clone(),
            content_type: self.config.webhook.content_type.clone(),
            subscribed_events: self.config.webhooks.events.clone(),
            disabled: false,
            secret_key: self.config.webhook.secret_key.clone(),
            skip_ssl_verification: true,
            timestamp: Utc::now().format(WEBHOOK_TIMESTAMP_FORMAT).to_string(),
            is_deleted: false,
        };
        let webhook = self.stores.webhooks.create_webhook(webhook).await?;
        info!(webhook_id = %webhook.id, "Webhook created");
        Ok(Some(webhook))
    }

    /// Build the default policy and record its first revision.
    ///
    /// A configured policy URL is also written to the organisation. The
    /// organisation patch and the revision both happen before the caller
    /// stores the policy, so a failure in either leaves no policy behind.
    #[instrument(skip(self, organisation), fields(organization_id = %organisation.id))]
    pub async fn build_default_policy(
        &self,
        organisation: &Organization,
        admin_id: &str,
    ) -> Result<Policy> {
        let policy = default_policy(&self.config, organisation)?;

        if let Some(url) = policy_url_override(&self.config) {
            let mut patched = organisation.clone();
            patched.policy_url = url.to_string();
            self.stores.organizations.update(patched).await?;
            info!(policy_url = url, "Organization policy URL updated");
        }

        let revision = self
            .stores
            .revisions
            .update_revision_for_policy(&policy, admin_id)
            .await?;
        debug!(revision_id = %revision.id, "Policy revision recorded");
        Ok(policy)
    }

    /// Create the default policy unless the organisation already has one.
    ///
    /// `None` means a policy existed and nothing was written.
    #[instrument(skip(self, organisation), fields(organization_id = %organisation.id))]
    pub async fn ensure_default_policy(
        &self,
        organisation: &Organization,
        admin_id: &str,
    ) -> Result<Option<Policy>> {
        let existing = self
            .stores
            .policies
            .count_by_organisation(&organisation.id)
            .await?;
        if existing > 0 {
            debug!(existing, "Policy already configured");
            return Ok(None);
        }

        info!("No policy found, creating default policy");
        let policy = self.build_default_policy(organisation, admin_id).await?;
        let policy = self.stores.policies.add(policy).await?;
        info!(policy_id = %policy.id, "Default policy created");
        Ok(Some(policy))
    }
}
