use crate::auth::CurrentUser;
use crate::database::Store;
use crate::error::app_error::AppError;
use crate::models::site::DashboardResponse;
use crate::service::dashboard::DashboardService;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;

/// The caller's email, organisation and the organisation's sites.
#[openapi(tag = "Dashboard")]
#[get("/")]
pub async fn get_dashboard(store: &State<Store>, current_user: CurrentUser) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = DashboardService::new(store.inner().as_ref()).load(&current_user.id).await?;
    Ok(Json(DashboardResponse::from(&dashboard)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_dashboard]
}
