use crate::database::organisation::OrganisationRepository;
use crate::database::profile::ProfileRepository;
use crate::error::app_error::AppError;
use crate::models::organisation::Organisation;
use tracing::{error, info};
use uuid::Uuid;

pub struct OrganisationService<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R> OrganisationService<'a, R>
where
    R: ProfileRepository + OrganisationRepository + Sync + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        OrganisationService { repository }
    }

    /// Creates an organisation and links the caller's profile to it.
    ///
    /// The two writes are independent: if linking fails the organisation row
    /// stays behind unlinked and the caller sees "Failed to link organisation.".
    pub async fn create_for_profile(&self, profile_id: &Uuid, name: &str) -> Result<Organisation, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Organisation name is required".to_string()));
        }

        let profile = self.repository.get_profile_by_id(profile_id).await?.ok_or(AppError::Unauthorized)?;
        if profile.organisation_id.is_some() {
            return Err(AppError::Conflict("Profile already belongs to an organisation".to_string()));
        }
        if !profile.role.can_create_organisation() {
            return Err(AppError::Forbidden);
        }

        let organisation = self.repository.create_organisation(name).await.map_err(|err| {
            error!(user_id = %profile_id, error = ?err, "failed to create organisation");
            AppError::OrganisationCreateFailed
        })?;

        self.repository
            .set_profile_organisation(profile_id, &organisation.id)
            .await
            .map_err(|err| {
                error!(user_id = %profile_id, organisation_id = %organisation.id, error = ?err, "failed to link organisation");
                AppError::OrganisationLinkFailed
            })?;

        info!(user_id = %profile_id, organisation_id = %organisation.id, "organisation created");
        Ok(organisation)
    }

    pub async fn current_organisation(&self, profile_id: &Uuid) -> Result<Option<Organisation>, AppError> {
        let profile = self.repository.get_profile_by_id(profile_id).await?.ok_or(AppError::Unauthorized)?;
        match profile.organisation_id {
            Some(organisation_id) => self.repository.get_organisation_by_id(&organisation_id).await,
            None => Ok(None),
        }
    }
}
