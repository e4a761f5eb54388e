//! Removal of multi-tenant leftovers
//!
//! Each guard only acts when more than one record exists and always keeps
//! the first one, so a single legitimate record is never deleted.

use tracing::warn;

use crate::org_type::OrgTypeRepository;
use crate::organization::OrganizationRepository;
use crate::policy::PolicyRepository;
use crate::Result;

pub(super) async fn remove_extra_org_types(org_types: &dyn OrgTypeRepository) -> Result<u64> {
    if org_types.count().await? <= 1 {
        return Ok(0);
    }
    let keep = org_types.get_first().await?;
    let removed = org_types.delete_all_except(&keep.id).await?;
    warn!(removed, kept = %keep.id, "Removed extra organization types");
    Ok(removed)
}

pub(super) async fn remove_extra_organizations(
    organizations: &dyn OrganizationRepository,
) -> Result<u64> {
    if organizations.count().await? <= 1 {
        return Ok(0);
    }
    let keep = organizations.get_first().await?;
    let removed = organizations.delete_all_except(&keep.id).await?;
    warn!(removed, kept = %keep.id, "Removed extra organizations");
    Ok(removed)
}

pub(super) async fn remove_extra_policies(
    policies: &dyn PolicyRepository,
    org_id: &str,
) -> Result<u64> {
    if policies.count_by_organisation(org_id).await? <= 1 {
        return Ok(0);
    }
    let keep = policies.get_first_by_organisation(org_id).await?;
    let removed = policies.delete_all_except(org_id, &keep.id).await?;
    warn!(removed, org_id, kept = %keep.id, "Removed extra policies");
    Ok(removed)
}
