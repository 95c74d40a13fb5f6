use crate::database::organisation::OrganisationRepository;
use crate::database::profile::ProfileRepository;
use crate::database::site::SiteRepository;
use crate::error::app_error::AppError;
use crate::models::organisation::{Organisation, OrganisationResponse};
use crate::models::profile::Profile;
use crate::models::site::{DashboardResponse, Site, SiteResponse};
use uuid::Uuid;

#[derive(Debug)]
pub struct Dashboard {
    pub profile: Profile,
    pub organisation: Option<Organisation>,
    pub sites: Vec<Site>,
}

impl From<&Dashboard> for DashboardResponse {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            email: dashboard.profile.email.clone(),
            organisation: dashboard.organisation.as_ref().map(OrganisationResponse::from),
            sites: dashboard.sites.iter().map(SiteResponse::from).collect(),
        }
    }
}

pub struct DashboardService<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R> DashboardService<'a, R>
where
    R: ProfileRepository + OrganisationRepository + SiteRepository + Sync + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        DashboardService { repository }
    }

    /// Sites are scoped by the organisation stored on the caller's profile.
    pub async fn load(&self, profile_id: &Uuid) -> Result<Dashboard, AppError> {
        let profile = self.repository.get_profile_by_id(profile_id).await?.ok_or(AppError::Unauthorized)?;

        let (organisation, sites) = match profile.organisation_id {
            Some(organisation_id) => {
                let organisation = self.repository.get_organisation_by_id(&organisation_id).await?;
                let sites = self.repository.list_sites_for_organisation(&organisation_id).await?;
                (organisation, sites)
            }
            None => (None, Vec::new()),
        };

        Ok(Dashboard { profile, organisation, sites })
    }
}
