use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

/// A visitor's name queued for badge printing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NameEntry {
    pub id: Uuid,
    pub session_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub printed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct NameEntryRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

impl NameEntryRequest {
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct NameEntryResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&NameEntry> for NameEntryResponse {
    fn from(entry: &NameEntry) -> Self {
        Self {
            id: entry.id,
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            created_at: entry.created_at,
        }
    }
}
