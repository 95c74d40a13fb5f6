use chrono::{DateTime, Utc};
use rocket::serde::Serialize;
use schemars::JsonSchema;
use uuid::Uuid;

pub const UNTITLED_SESSION: &str = "Untitled Session";

/// A time-bounded event under a site.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub site_id: Uuid,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub access_code: String,
}

impl Session {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time <= now
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED_SESSION,
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub access_code: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            title: session.display_title().to_string(),
            start_time: session.start_time,
            end_time: session.end_time,
            access_code: session.access_code.clone(),
        }
    }
}
