use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Organisation {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct OrganisationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct OrganisationResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Organisation> for OrganisationResponse {
    fn from(organisation: &Organisation) -> Self {
        Self {
            id: organisation.id,
            name: organisation.name.clone(),
            created_at: organisation.created_at,
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct OrganisationCreatedResponse {
    pub organisation: OrganisationResponse,
    pub redirect_to: String,
}
