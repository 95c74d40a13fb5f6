use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub labels: LabelConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
    /// Apply the bundled sqlx migrations when the pool is staged.
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_path: String,
    pub enable_swagger: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Settings for the hosted authentication platform and the login cookie.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Base URL of the auth platform, e.g. `https://<project>.example.co`.
    pub provider_url: String,
    /// Public (anon) API key sent with every identity lookup.
    pub api_key: String,
    pub request_timeout_seconds: u64,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelConfig {
    /// Session whose name entries the label worker prints.
    pub session_id: Option<Uuid>,
    pub poll_interval_seconds: u64,
    pub batch_size: i64,
    pub width_mm: u32,
    pub height_mm: u32,
    pub output_dir: String,
    /// Command that receives the rendered label path as its last argument.
    /// When unset the worker only renders (preview mode).
    pub print_command: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/twibbly".to_string(),
            max_connections: 16,
            min_connections: 2,
            acquire_timeout: 5,
            run_migrations: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            address: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            enable_swagger: true,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 10,
            session_ttl_seconds: 60 * 60 * 24 * 7,
            cookie_secure: false,
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            poll_interval_seconds: 2,
            batch_size: 20,
            width_mm: 52,
            height_mm: 60,
            output_dir: "labels".to_string(),
            print_command: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Twibbly.toml (if present)
    /// 3. Environment variables prefixed with TWIBBLY_ (`__` separates sections,
    ///    e.g. TWIBBLY_AUTH__API_KEY)
    /// 4. DATABASE_URL
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("Twibbly.toml"))
            .merge(Env::prefixed("TWIBBLY_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "database.url".into()))
    }
}
