use rocket::serde::Serialize;
use rocket::serde::json::Json;
use rocket::{Request, catch};
use schemars::JsonSchema;

use crate::models::navigation::AppRoute;

#[derive(Serialize, Debug, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub message: String,
    /// Client route to navigate to, set when the caller must sign in again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_to: None,
        }
    }

    pub fn sign_in_required(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_to: Some(AppRoute::EntryPage.path()),
        }
    }
}

#[catch(400)]
pub fn bad_request(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Bad request"))
}

#[catch(401)]
pub fn unauthorized(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::sign_in_required("Unauthorized"))
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Not found"))
}

#[catch(409)]
pub fn conflict(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Conflict"))
}

#[catch(422)]
pub fn unprocessable_entity(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Malformed request body"))
}

#[catch(500)]
pub fn internal_error(_: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Internal server error"))
}
