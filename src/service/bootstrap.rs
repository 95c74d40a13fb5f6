use crate::database::profile::ProfileRepository;
use crate::error::app_error::AppError;
use crate::models::navigation::AppRoute;
use crate::models::profile::{Identity, Profile};
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub profile: Profile,
    pub redirect: Option<AppRoute>,
}

/// Where a freshly bootstrapped caller has to go next, if anywhere.
pub fn redirect_after_bootstrap(profile: &Profile) -> Option<AppRoute> {
    profile.needs_organisation().then_some(AppRoute::CreateOrganisation)
}

/// Makes sure every signed-in identity has a profile row. Safe to run on
/// every load: the store's primary key on the identity id makes the insert a
/// no-op once the row exists.
pub struct BootstrapService<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R> BootstrapService<'a, R>
where
    R: ProfileRepository + Sync + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        BootstrapService { repository }
    }

    pub async fn ensure_profile(&self, identity: &Identity) -> Result<BootstrapOutcome, AppError> {
        let profile = self.repository.ensure_profile(identity).await?;
        let redirect = redirect_after_bootstrap(&profile);
        debug!(user_id = %profile.id, role = ?profile.role, redirect = ?redirect, "profile ensured");

        Ok(BootstrapOutcome { profile, redirect })
    }

    /// Like [`ensure_profile`](Self::ensure_profile) but failures are only logged.
    pub async fn ensure_profile_best_effort(&self, identity: &Identity) -> Option<BootstrapOutcome> {
        match self.ensure_profile(identity).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                error!(user_id = %identity.id, error = ?err, "failed to ensure profile");
                None
            }
        }
    }
}
