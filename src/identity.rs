use crate::config::AuthConfig;
use crate::error::app_error::AppError;
use crate::models::profile::Identity;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Resolves a browser's access token to the identity it was issued for.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, access_token: &str) -> Result<Identity, AppError>;
    /// Revokes `access_token` with the platform. A token the platform no
    /// longer accepts counts as revoked.
    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;
}

pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
}

/// Asks the hosted authentication platform who owns a token
/// (`GET /auth/v1/user`) and revokes it on sign-out (`POST /auth/v1/logout`).
pub struct RemoteIdentityProvider {
    client: reqwest::Client,
    user_url: String,
    logout_url: String,
    api_key: String,
}

impl RemoteIdentityProvider {
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::identity_provider("Failed to build HTTP client", e))?;

        let base_url = config.provider_url.trim_end_matches('/');
        Ok(Self {
            client,
            user_url: format!("{base_url}/auth/v1/user"),
            logout_url: format!("{base_url}/auth/v1/logout"),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn verify(&self, access_token: &str) -> Result<Identity, AppError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::identity_provider("Identity lookup failed", e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("access token rejected by identity provider");
                return Err(AppError::InvalidCredentials);
            }
            status if !status.is_success() => {
                warn!(status = %status, "identity provider returned an unexpected status");
            }
            _ => {}
        }

        let user = response
            .error_for_status()
            .map_err(|e| AppError::identity_provider("Identity lookup failed", e))?
            .json::<AuthUser>()
            .await
            .map_err(|e| AppError::identity_provider("Malformed identity response", e))?;

        Ok(Identity {
            id: user.id,
            email: user.email.unwrap_or_default(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .post(&self.logout_url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::identity_provider("Sign-out request failed", e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                debug!("access token already revoked");
                Ok(())
            }
            _ => {
                response
                    .error_for_status()
                    .map_err(|e| AppError::identity_provider("Sign-out rejected", e))?;
                Ok(())
            }
        }
    }
}
