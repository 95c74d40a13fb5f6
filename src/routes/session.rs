use crate::database::Store;
use crate::error::app_error::AppError;
use crate::models::name_entry::{NameEntryRequest, NameEntryResponse};
use crate::models::session::SessionResponse;
use crate::service::session::SessionService;
use chrono::Utc;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;

/// A running or upcoming session, looked up by its own access code.
#[openapi(tag = "Sessions")]
#[get("/<access_code>")]
pub async fn get_session(store: &State<Store>, access_code: String) -> Result<Json<SessionResponse>, AppError> {
    let session = SessionService::new(store.inner().as_ref())
        .find_open_session(&access_code, Utc::now())
        .await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// Queue a visitor's name for badge printing.
#[openapi(tag = "Sessions")]
#[post("/<access_code>/entries", data = "<payload>")]
pub async fn create_name_entry(
    store: &State<Store>,
    access_code: String,
    payload: Json<NameEntryRequest>,
) -> Result<Created<Json<NameEntryResponse>>, AppError> {
    let entry = SessionService::new(store.inner().as_ref())
        .register_name(&access_code, &payload, Utc::now())
        .await?;
    Ok(Created::new(entry.id.to_string()).body(Json(NameEntryResponse::from(&entry))))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_session, create_name_entry]
}
