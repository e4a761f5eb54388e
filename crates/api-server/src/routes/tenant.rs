//! Read-only view of the bootstrapped tenant

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use consent_core::policy::Policy;
use consent_core::Error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub policy_url: String,
    pub type_name: Option<String>,
    pub admin_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyView {
    pub id: String,
    pub name: String,
    pub version: String,
    pub url: String,
    pub jurisdiction: String,
    pub data_retention_period_days: u32,
    pub third_party_data_sharing: bool,
}

impl From<Policy> for PolicyView {
    fn from(policy: Policy) -> Self {
        Self {
            id: policy.id,
            name: policy.name,
            version: policy.version,
            url: policy.url,
            jurisdiction: policy.jurisdiction,
            data_retention_period_days: policy.data_retention_period_days,
            third_party_data_sharing: policy.third_party_data_sharing,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    pub organization: OrganizationView,
    pub policy: Option<PolicyView>,
    pub identity_provider_count: u64,
    pub webhook_count: u64,
}

fn map_store_error(err: Error) -> RouteError {
    let status = match err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Conflict(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Returns `None` for NotFound, passing every other error through
fn optional<T>(result: consent_core::Result<T>) -> Result<Option<T>, RouteError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(map_store_error(err)),
    }
}

async fn get_tenant(State(state): State<AppState>) -> Result<Json<TenantResponse>, RouteError> {
    let stores = state.stores();
    let organization = stores
        .organizations
        .get_first()
        .await
        .map_err(map_store_error)?;
    let org_type = optional(stores.org_types.get_first().await)?;
    let policy = optional(
        stores
            .policies
            .get_first_by_organisation(&organization.id)
            .await,
    )?;
    let identity_provider_count = stores
        .identity_providers
        .count_by_organisation(&organization.id)
        .await
        .map_err(map_store_error)?;
    let webhook_count = stores
        .webhooks
        .count_by_organisation(&organization.id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(TenantResponse {
        organization: OrganizationView {
            admin_ids: organization
                .admins
                .iter()
                .map(|admin| admin.user_id.clone())
                .collect(),
            id: organization.id,
            name: organization.name,
            location: organization.location,
            description: organization.description,
            policy_url: organization.policy_url,
            type_name: org_type.map(|t| t.type_name),
        },
        policy: policy.map(PolicyView::from),
        identity_provider_count,
        webhook_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/tenant", get(get_tenant))
}
