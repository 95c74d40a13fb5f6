use crate::auth::CurrentUser;
use crate::database::Store;
use crate::error::app_error::AppError;
use crate::models::navigation::AppRoute;
use crate::models::organisation::{OrganisationCreatedResponse, OrganisationRequest, OrganisationResponse};
use crate::service::organisation::OrganisationService;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use validator::Validate;

/// Create an organisation and link the caller to it.
///
/// 400 when the name is blank, 409 when the caller already has an
/// organisation, 403 for roles that may not create one. A failed link keeps
/// the created organisation.
#[openapi(tag = "Organisations")]
#[post("/", data = "<payload>")]
pub async fn create_organisation(
    store: &State<Store>,
    current_user: CurrentUser,
    payload: Json<OrganisationRequest>,
) -> Result<Created<Json<OrganisationCreatedResponse>>, AppError> {
    payload.validate()?;

    let organisation = OrganisationService::new(store.inner().as_ref())
        .create_for_profile(&current_user.id, &payload.name)
        .await?;

    let body = OrganisationCreatedResponse {
        organisation: OrganisationResponse::from(&organisation),
        redirect_to: AppRoute::Dashboard.path(),
    };
    Ok(Created::new("current").body(Json(body)))
}

#[openapi(tag = "Organisations")]
#[get("/current")]
pub async fn get_current_organisation(store: &State<Store>, current_user: CurrentUser) -> Result<Json<OrganisationResponse>, AppError> {
    let organisation = OrganisationService::new(store.inner().as_ref())
        .current_organisation(&current_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organisation not found".to_string()))?;

    Ok(Json(OrganisationResponse::from(&organisation)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_organisation, get_current_organisation]
}
