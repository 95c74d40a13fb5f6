use crate::database::session::SessionRepository;
use crate::database::site::SiteRepository;
use crate::error::app_error::{AppError, SITE_ACCESS_DENIED_MESSAGE};
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use tracing::{debug, error};
use uuid::Uuid;

/// Visitor input is compared exactly, after surrounding whitespace is removed.
pub fn normalize_access_code(raw: &str) -> &str {
    raw.trim()
}

/// Lifecycle of one visitor's access attempt:
/// `Idle -> Checking -> (Error | Submitted)`. `Error` allows another
/// submission; `Submitted` is final.
#[derive(Debug, Clone)]
pub enum SiteAccessState {
    Idle,
    Checking,
    Error(String),
    Submitted(Vec<Session>),
}

impl SiteAccessState {
    pub fn name(&self) -> &'static str {
        match self {
            SiteAccessState::Idle => "idle",
            SiteAccessState::Checking => "checking",
            SiteAccessState::Error(_) => "error",
            SiteAccessState::Submitted(_) => "submitted",
        }
    }
}

pub struct SiteAccessFlow<'a, R: ?Sized> {
    repository: &'a R,
    site_id: Option<Uuid>,
    state: SiteAccessState,
}

impl<'a, R> SiteAccessFlow<'a, R>
where
    R: SiteRepository + SessionRepository + Sync + ?Sized,
{
    /// `raw_site_id` comes straight from the route; an unparseable id is kept
    /// as "no site" so it fails exactly like a wrong code.
    pub fn new(repository: &'a R, raw_site_id: &str) -> Self {
        Self {
            repository,
            site_id: Uuid::parse_str(raw_site_id.trim()).ok(),
            state: SiteAccessState::Idle,
        }
    }

    pub fn state(&self) -> &SiteAccessState {
        &self.state
    }

    pub fn site_id(&self) -> Option<Uuid> {
        self.site_id
    }

    pub async fn submit(&mut self, access_code: &str, now: DateTime<Utc>) -> Result<&[Session], AppError> {
        if matches!(self.state, SiteAccessState::Submitted(_)) {
            return Ok(self.sessions());
        }

        self.state = SiteAccessState::Checking;

        let Some(site_id) = self.granted_site(access_code).await else {
            self.state = SiteAccessState::Error(SITE_ACCESS_DENIED_MESSAGE.to_string());
            return Err(AppError::SiteAccessDenied);
        };

        match self.repository.list_upcoming_sessions(&site_id, now).await {
            Ok(sessions) => {
                debug!(site_id = %site_id, session_count = sessions.len(), "site access granted");
                self.state = SiteAccessState::Submitted(sessions);
                Ok(self.sessions())
            }
            Err(err) => {
                error!(site_id = %site_id, error = ?err, "failed to load sessions");
                let failure = AppError::SessionsUnavailable;
                self.state = SiteAccessState::Error(failure.to_string());
                Err(failure)
            }
        }
    }

    async fn granted_site(&self, access_code: &str) -> Option<Uuid> {
        let site_id = self.site_id?;
        let code = normalize_access_code(access_code);
        if code.is_empty() {
            return None;
        }

        match self.repository.find_site_by_access_code(&site_id, code).await {
            Ok(site) => site.map(|site| site.id),
            Err(err) => {
                error!(site_id = %site_id, error = ?err, "site lookup failed");
                None
            }
        }
    }

    fn sessions(&self) -> &[Session] {
        match &self.state {
            SiteAccessState::Submitted(sessions) => sessions,
            _ => &[],
        }
    }
}
