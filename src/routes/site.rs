use crate::database::Store;
use crate::error::app_error::AppError;
use crate::models::session::SessionResponse;
use crate::models::site::{SiteAccessRequest, SiteAccessResponse};
use crate::service::site_access::SiteAccessFlow;
use chrono::Utc;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;

/// Unlock a site with its access code and list its upcoming sessions.
///
/// Public. Unknown sites and wrong codes both answer 404 with the same
/// message.
#[openapi(tag = "Sites")]
#[post("/<id>/access", data = "<payload>")]
pub async fn access_site(store: &State<Store>, id: String, payload: Json<SiteAccessRequest>) -> Result<Json<SiteAccessResponse>, AppError> {
    let mut flow = SiteAccessFlow::new(store.inner().as_ref(), &id);

    let sessions: Vec<SessionResponse> = flow
        .submit(&payload.access_code, Utc::now())
        .await?
        .iter()
        .map(SessionResponse::from)
        .collect();
    let site_id = flow.site_id().ok_or(AppError::SiteAccessDenied)?;

    Ok(Json(SiteAccessResponse {
        state: flow.state().name(),
        site_id,
        sessions,
    }))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![access_site]
}
