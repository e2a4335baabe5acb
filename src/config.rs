// src/config.rs
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_DAILY_REQUESTS: u64 = 1000;
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Origins allowed to call the API from a browser. `null` covers pages opened from disk.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "https://takatomioku.github.io",
    "http://localhost:3000",
    "null",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl DatabaseConfig {
    pub const MAX_CONNECTIONS: u32 = 10;
    pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
}

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub database: Option<DatabaseConfig>,
    pub port: u16,
    pub max_daily_requests: u64,
    pub environment: String,
    pub static_dir: String,
    pub rate_limit_window: Duration,
    pub rate_limit_max: u32,
    /// Key clients on the last `X-Forwarded-For` hop instead of the socket peer.
    pub trust_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            database: None,
            port: DEFAULT_PORT,
            max_daily_requests: DEFAULT_MAX_DAILY_REQUESTS,
            environment: "development".to_string(),
            static_dir: "public".to_string(),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max: 10,
            trust_proxy: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let database = match (get("DB_HOST"), get("DB_USER"), get("DB_PASSWORD"), get("DB_NAME")) {
            (Some(host), Some(user), Some(password), Some(database)) => Some(DatabaseConfig {
                host,
                user,
                password,
                database,
                port: get("DB_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_DB_PORT),
            }),
            _ => None,
        };

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            database,
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
            max_daily_requests: get("MAX_DAILY_REQUESTS")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_daily_requests),
            environment: get("NODE_ENV")
                .or_else(|| get("APP_ENV"))
                .unwrap_or(defaults.environment),
            static_dir: get("STATIC_DIR").unwrap_or(defaults.static_dir),
            trust_proxy: get("TRUST_PROXY").is_some_and(|v| is_truthy(&v)),
            ..defaults
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
