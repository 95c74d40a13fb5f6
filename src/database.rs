pub mod login_session;
pub mod name_entry;
pub mod organisation;
pub mod postgres_repository;
pub mod profile;
pub mod session;
pub mod site;

use crate::database::login_session::LoginSessionRepository;
use crate::database::name_entry::NameEntryRepository;
use crate::database::organisation::OrganisationRepository;
use crate::database::profile::ProfileRepository;
use crate::database::session::SessionRepository;
use crate::database::site::SiteRepository;
use std::sync::Arc;

/// Every query surface the application needs from its backing store.
pub trait Backend:
    ProfileRepository + OrganisationRepository + SiteRepository + SessionRepository + LoginSessionRepository + NameEntryRepository + Send + Sync
{
}

impl<T> Backend for T where
    T: ProfileRepository + OrganisationRepository + SiteRepository + SessionRepository + LoginSessionRepository + NameEntryRepository + Send + Sync
{
}

/// Store handle placed in Rocket managed state and handed to every route.
pub type Store = Arc<dyn Backend>;
