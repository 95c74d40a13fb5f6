use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;

use crate::models::organisation::OrganisationResponse;
use crate::models::session::SessionResponse;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub organisation_id: Uuid,
    pub access_code: String,
}

/// Site as listed to its organisation's administrators. The access code is
/// shown so admins can hand it out.
#[derive(Serialize, Debug, JsonSchema)]
pub struct SiteResponse {
    pub id: Uuid,
    pub name: String,
    pub access_code: String,
    pub access_path: String,
}

impl From<&Site> for SiteResponse {
    fn from(site: &Site) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            access_code: site.access_code.clone(),
            access_path: crate::models::navigation::AppRoute::SiteAccess(site.id).path(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct DashboardResponse {
    pub email: String,
    pub organisation: Option<OrganisationResponse>,
    pub sites: Vec<SiteResponse>,
}

#[derive(Deserialize, Debug, JsonSchema)]
pub struct SiteAccessRequest {
    pub access_code: String,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct SiteAccessResponse {
    pub state: &'static str,
    pub site_id: Uuid,
    pub sessions: Vec<SessionResponse>,
}
