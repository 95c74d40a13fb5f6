use crate::database::name_entry::NameEntryRepository;
use crate::database::session::SessionRepository;
use crate::error::app_error::AppError;
use crate::models::name_entry::{NameEntry, NameEntryRequest};
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found.".to_string())
}

pub struct SessionService<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R> SessionService<'a, R>
where
    R: SessionRepository + NameEntryRepository + Sync + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        SessionService { repository }
    }

    /// A session reachable by its access code, as long as it has not ended.
    pub async fn find_open_session(&self, access_code: &str, now: DateTime<Utc>) -> Result<Session, AppError> {
        let code = access_code.trim();
        if code.is_empty() {
            return Err(session_not_found());
        }

        match self.repository.get_session_by_access_code(code).await? {
            Some(session) if !session.has_ended(now) => Ok(session),
            _ => Err(session_not_found()),
        }
    }

    pub async fn register_name(&self, access_code: &str, request: &NameEntryRequest, now: DateTime<Utc>) -> Result<NameEntry, AppError> {
        let request = request.trimmed();
        request.validate()?;

        let session = self.find_open_session(access_code, now).await?;
        let entry = self.repository.create_name_entry(&session.id, &request).await?;
        info!(session_id = %session.id, entry_id = %entry.id, "name entry queued for printing");

        Ok(entry)
    }
}
