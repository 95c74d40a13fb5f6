mod auth;
mod config;
mod database;
mod db;
mod error;
mod identity;
mod label_worker;
mod middleware;
mod models;
mod routes;
mod service;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use label_worker::run_label_worker;

use crate::config::{AuthConfig, CorsConfig};
use crate::db::stage_db;
use crate::identity::{RemoteIdentityProvider, SharedIdentityProvider};
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence over `level`, e.g. `RUST_LOG=info,twibbly::service=debug`.
pub fn init_tracing(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    let result = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
    if let Err(err) = result {
        eprintln!("tracing already initialised: {err}");
    }
}

fn ensure_rocket_secret_key() {
    let profile = std::env::var("ROCKET_PROFILE").unwrap_or_else(|_| "debug".to_string());

    // Private cookies from a generated key do not survive restarts.
    if profile != "debug" && std::env::var("ROCKET_SECRET_KEY").is_err() {
        panic!(
            "ROCKET_SECRET_KEY is required for profile '{}'. Generate one with: openssl rand -base64 32",
            profile
        );
    }
}

fn build_cors(cors_config: &CorsConfig) -> CorsOptions {
    let is_wildcard = cors_config.allowed_origins.iter().any(|origin| origin == "*");

    if is_wildcard && cors_config.allow_credentials {
        panic!("Invalid CORS configuration: wildcard origins (*) cannot be combined with credentials. Set explicit origins or disable credentials.");
    }

    let allowed_origins = if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Post, Method::Options, Method::Head].into_iter().map(From::from).collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Accept"]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return config::DEFAULT_API_BASE_PATH.to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn join_base_path(base_path: &str, path: &str) -> String {
    format!("{}/{}", base_path.trim_end_matches('/'), path.trim_start_matches('/'))
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

fn collect_route_specs() -> Vec<RouteSpec> {
    let specs = [
        ("/health", app_routes::health::routes()),
        ("/auth", app_routes::auth::routes()),
        ("/organisations", app_routes::organisation::routes()),
        ("/dashboard", app_routes::dashboard::routes()),
        ("/sites", app_routes::site::routes()),
        ("/sessions", app_routes::session::routes()),
    ];

    specs
        .into_iter()
        .map(|(path, (routes, openapi))| RouteSpec { path, routes, openapi })
        .collect()
}

/// Mounts every API route and JSON catcher under `base_path`.
pub(crate) fn mount_api(mut rocket: Rocket<Build>, base_path: &str, enable_swagger: bool) -> Rocket<Build> {
    let mut openapi_list = Vec::new();
    for spec in collect_route_specs() {
        rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        openapi_list.push((spec.path, spec.openapi));
    }

    if enable_swagger {
        match marge_spec_list(&openapi_list) {
            Ok(docs) => {
                let settings = rocket_okapi::settings::OpenApiSettings::default();
                rocket = rocket.mount(base_path, vec![get_openapi_route(docs, &settings)]);
                rocket = rocket.mount(
                    join_base_path(base_path, "docs"),
                    make_swagger_ui(&SwaggerUIConfig {
                        url: join_base_path(base_path, "openapi.json"),
                        ..Default::default()
                    }),
                );
            }
            Err(err) => tracing::error!(error = %err, "could not merge OpenAPI spec, docs disabled"),
        }
    }

    rocket.register(
        base_path,
        catchers![
            app_routes::error::bad_request,
            app_routes::error::unauthorized,
            app_routes::error::not_found,
            app_routes::error::conflict,
            app_routes::error::unprocessable_entity,
            app_routes::error::internal_error
        ],
    )
}

fn stage_identity_provider(auth_config: AuthConfig) -> AdHoc {
    AdHoc::try_on_ignite("Identity provider", |rocket| async move {
        match RemoteIdentityProvider::new(&auth_config) {
            Ok(provider) => {
                tracing::info!(provider_url = %auth_config.provider_url, "identity provider configured");
                let shared: SharedIdentityProvider = Arc::new(provider);
                Ok(rocket.manage(shared))
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to configure identity provider");
                Err(rocket)
            }
        }
    })
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    ensure_rocket_secret_key();

    let cors = build_cors(&config.cors).to_cors().expect("Failed to create CORS fairing");
    let base_path = normalize_base_path(&config.api.base_path);

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", config.server.address.clone()));

    let rocket = rocket::custom(figment)
        .attach(cors)
        .attach(RequestLogger)
        .attach(stage_db(config.database.clone()))
        .attach(stage_identity_provider(config.auth.clone()));

    mount_api(rocket, &base_path, config.api.enable_swagger).manage(config)
}
