use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response};
use rocket_okapi::OpenApiError;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::routes::error::ErrorBody;

/// Message returned for every failed site access attempt. An unknown site and a
/// wrong access code must be indistinguishable to the visitor.
pub const SITE_ACCESS_DENIED_MESSAGE: &str = "Site not found or incorrect access code.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error")]
    Db {
        message: String,
        #[source]
        source: sqlx::error::Error,
    },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("{}", SITE_ACCESS_DENIED_MESSAGE)]
    SiteAccessDenied,
    #[error("Failed to load sessions.")]
    SessionsUnavailable,
    #[error("Failed to create organisation.")]
    OrganisationCreateFailed,
    #[error("Failed to link organisation.")]
    OrganisationLinkFailed,
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error("Identity provider unavailable")]
    IdentityProvider {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Label output failed: {message}")]
    Label {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn db(message: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            message: message.into(),
            source,
        }
    }

    pub fn identity_provider(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::IdentityProvider {
            message: message.into(),
            source,
        }
    }

    pub fn label(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Label {
            message: message.into(),
            source,
        }
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::Db { .. } => Status::InternalServerError,
            AppError::Unauthorized => Status::Unauthorized,
            AppError::InvalidCredentials => Status::Unauthorized,
            AppError::Forbidden => Status::Forbidden,
            AppError::BadRequest(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Conflict(_) => Status::Conflict,
            AppError::SiteAccessDenied => Status::NotFound,
            AppError::SessionsUnavailable => Status::InternalServerError,
            AppError::OrganisationCreateFailed => Status::InternalServerError,
            AppError::OrganisationLinkFailed => Status::InternalServerError,
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::IdentityProvider { .. } => Status::BadGateway,
            AppError::Label { .. } => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        let user_id = req
            .local_cache(|| None::<crate::auth::CurrentUser>)
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string());

        error!(
            error = ?self,
            request_id = %request_id,
            user_id = %user_id,
            method = %method,
            uri = %uri,
            "request failed"
        );

        let status = Status::from(&self);
        let body = if status == Status::Unauthorized {
            ErrorBody::sign_in_required(self.to_string())
        } else {
            ErrorBody::new(self.to_string())
        };

        Response::build_from(Json(body).respond_to(req)?).status(status).ok()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> Result<Responses, OpenApiError> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "Bad Request"),
            ("401", "Unauthorized - sign in again"),
            ("404", "Not Found"),
            ("409", "Conflict"),
            ("500", "Internal Server Error"),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::db("Database error", e),
        }
    }
}
