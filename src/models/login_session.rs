use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Server-side record behind the private `user` cookie. Holds the platform
/// access token it was created from so sign-out can revoke it.
#[derive(Clone, sqlx::FromRow)]
pub struct LoginSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
}

impl fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginSession")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_access_token() {
        let session = LoginSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            access_token: "secret-platform-token".to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now(),
            user_agent: None,
        };
        assert!(!format!("{session:?}").contains("secret-platform-token"));
    }
}
