use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Default, JsonSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    #[default]
    OrgAdmin,
    OrgUser,
    User,
}

impl Role {
    pub fn can_create_organisation(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::OrgAdmin)
    }
}

/// An identity as verified by the authentication platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Application-level user record, one row per identity.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub organisation_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn needs_organisation(&self) -> bool {
        self.role == Role::OrgAdmin && self.organisation_id.is_none()
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub organisation_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
            organisation_id: profile.organisation_id,
            created_at: profile.created_at,
        }
    }
}

#[derive(Deserialize, Debug, JsonSchema)]
pub struct SignInRequest {
    /// Access token issued to the browser by the authentication platform.
    pub access_token: String,
}

/// Result of ensuring the caller has a profile.
#[derive(Serialize, Debug, JsonSchema)]
pub struct BootstrapResponse {
    pub profile: Option<ProfileResponse>,
    pub redirect_to: Option<String>,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct SignOutResponse {
    pub redirect_to: String,
}
