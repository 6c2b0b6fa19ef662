use actix_web::http::Uri;
use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9090;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("SEED_DEMO_USERS must be true or false, got '{0}'")]
    InvalidFlag(String),

    #[error("CORS_ORIGINS entries must be '*' or scheme://host[:port], got '{0}'")]
    InvalidOrigin(String),
}

/// Runtime settings, read from the environment (after `.env` is loaded)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// MongoDB URI; `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub seed_demo_users: bool,
    /// Empty means any origin is allowed
    pub cors_origins: Vec<String>,
}

/// Origin as a browser sends it: scheme and host, nothing after the port
fn is_valid_origin(origin: &str) -> bool {
    match origin.parse::<Uri>() {
        Ok(uri) => {
            uri.scheme().is_some()
                && uri.host().is_some()
                && uri.path_and_query().map_or(true, |pq| pq.as_str() == "/")
                && !origin.ends_with('/')
        }
        Err(_) => false,
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let seed_demo_users = match non_empty("SEED_DEMO_USERS") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(ConfigError::InvalidFlag(raw)),
            },
            None => false,
        };

        let mut cors_origins: Vec<String> = non_empty("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        if cors_origins.iter().any(|o| o == "*") {
            cors_origins.clear();
        }
        if let Some(invalid) = cors_origins.iter().find(|o| !is_valid_origin(o)) {
            return Err(ConfigError::InvalidOrigin(invalid.clone()));
        }

        Ok(Self {
            host,
            port,
            database_url: non_empty("DATABASE_URL"),
            seed_demo_users,
            cors_origins,
        })
    }
}
