use crate::auth::{AUTH_COOKIE, CurrentUser, auth_cookie_value, parse_session_cookie_value};
use crate::config::Config;
use crate::database::Store;
use crate::error::app_error::AppError;
use crate::identity::SharedIdentityProvider;
use crate::middleware::UserAgent;
use crate::models::navigation::AppRoute;
use crate::models::profile::{BootstrapResponse, Identity, ProfileResponse, SignInRequest, SignOutResponse};
use crate::service::bootstrap::{BootstrapOutcome, BootstrapService};
use chrono::{Duration, Utc};
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use tracing::{info, warn};

pub(crate) fn build_auth_cookie(value: String, secure: bool, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(rocket::time::Duration::seconds(ttl_seconds))
        .build()
}

fn bootstrap_response(outcome: Option<BootstrapOutcome>) -> BootstrapResponse {
    match outcome {
        Some(outcome) => BootstrapResponse {
            profile: Some(ProfileResponse::from(&outcome.profile)),
            redirect_to: outcome.redirect.map(|route| route.path()),
        },
        None => BootstrapResponse {
            profile: None,
            redirect_to: None,
        },
    }
}

/// Exchange an identity-provider access token for a session cookie.
/// The caller's profile is created on first sign-in.
#[openapi(tag = "Auth")]
#[post("/session", data = "<payload>")]
pub async fn sign_in(
    store: &State<Store>,
    identity_provider: &State<SharedIdentityProvider>,
    config: &State<Config>,
    cookies: &CookieJar<'_>,
    user_agent: UserAgent,
    payload: Json<SignInRequest>,
) -> Result<Json<BootstrapResponse>, AppError> {
    let identity = identity_provider.verify(&payload.access_token).await?;

    let Some(outcome) = BootstrapService::new(store.inner().as_ref()).ensure_profile_best_effort(&identity).await else {
        return Err(AppError::Unauthorized);
    };

    let ttl_seconds = config.auth.session_ttl_seconds;
    let expires_at = Utc::now() + Duration::seconds(ttl_seconds);
    let session = store
        .create_login_session(&outcome.profile.id, payload.access_token.trim(), expires_at, user_agent.0.as_deref())
        .await?;

    cookies.add_private(build_auth_cookie(
        auth_cookie_value(&session.id, &outcome.profile.id),
        config.auth.cookie_secure,
        ttl_seconds,
    ));
    info!(user_id = %outcome.profile.id, session_id = %session.id, "signed in");

    Ok(Json(bootstrap_response(Some(outcome))))
}

/// Ensure the signed-in caller has a profile and report where to go next.
/// Failures are logged and reported as an empty result.
#[openapi(tag = "Auth")]
#[get("/bootstrap")]
pub async fn bootstrap(store: &State<Store>, current_user: CurrentUser) -> Json<BootstrapResponse> {
    let identity = Identity {
        id: current_user.id,
        email: current_user.email,
    };
    let outcome = BootstrapService::new(store.inner().as_ref()).ensure_profile_best_effort(&identity).await;
    Json(bootstrap_response(outcome))
}

/// End the current login session and revoke its access token with the auth
/// platform. Succeeds with or without a valid cookie.
#[openapi(tag = "Auth")]
#[post("/logout")]
pub async fn sign_out(store: &State<Store>, identity_provider: &State<SharedIdentityProvider>, cookies: &CookieJar<'_>) -> Json<SignOutResponse> {
    if let Some(cookie) = cookies.get_private(AUTH_COOKIE)
        && let Some((session_id, _)) = parse_session_cookie_value(cookie.value())
    {
        match store.delete_login_session(&session_id).await {
            Ok(Some(session)) => {
                if let Err(err) = identity_provider.sign_out(&session.access_token).await {
                    warn!(session_id = %session_id, error = ?err, "failed to revoke access token");
                }
                info!(user_id = %session.user_id, session_id = %session_id, "signed out");
            }
            Ok(None) => {}
            Err(err) => warn!(session_id = %session_id, error = ?err, "failed to delete login session"),
        }
    }

    cookies.remove_private(Cookie::build(AUTH_COOKIE).path("/").build());

    Json(SignOutResponse {
        redirect_to: AppRoute::EntryPage.path(),
    })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![sign_in, bootstrap, sign_out]
}
