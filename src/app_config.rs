// Centralized configuration management for the recipe backend
// Load ALL env vars ONCE at startup

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::services::short_code::{DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, MAX_CODE_LENGTH};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global application configuration, set by the first successful `load`
pub static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Server
    pub bind_address: String,
    pub environment: Environment,
    pub rust_log: String,
    pub public_base_url: String,
    pub cors_allowed_origins: Vec<String>,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub database_connect_timeout: u64,
    pub database_idle_timeout: u64,
    pub database_max_lifetime: u64,
    pub disable_embedded_migrations: bool,

    // Short links
    pub short_code_length: usize,
    pub short_code_max_attempts: usize,

    // JWT (verification only, tokens are issued by the auth service)
    pub jwt_access_secret: String,
    pub jwt_audience: String,
    pub jwt_issuer: String,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let get_required = |key: &str| -> Result<String, ConfigError> {
            env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
        };

        let get_or_default = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_usize_or_default = |key: &str, default: usize| -> Result<usize, ConfigError> {
            get_or_default(key, &default.to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue(key.to_string(), "not a valid usize".to_string())
                })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:8080");

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));
        let rust_log = get_or_default("RUST_LOG", "info");

        let public_base_url = get_or_default("PUBLIC_BASE_URL", "http://localhost:8080")
            .trim_end_matches('/')
            .to_string();
        if url::Url::parse(&public_base_url).is_err() {
            return Err(ConfigError::InvalidValue(
                "PUBLIC_BASE_URL".to_string(),
                "must be an absolute URL".to_string(),
            ));
        }

        let cors_allowed_origins: Vec<String> = get_or_default("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let database_url = get_required("DATABASE_URL")?;
        let database_max_connections = parse_or_default("DATABASE_MAX_CONNECTIONS", "20")?;
        let database_min_connections = parse_or_default("DATABASE_MIN_CONNECTIONS", "2")?;
        let database_connect_timeout = parse_u64_or_default("DATABASE_CONNECT_TIMEOUT", "30")?;
        let database_idle_timeout = parse_u64_or_default("DATABASE_IDLE_TIMEOUT", "600")?;
        let database_max_lifetime = parse_u64_or_default("DATABASE_MAX_LIFETIME", "1800")?;
        let disable_embedded_migrations =
            parse_bool_or_default("DISABLE_EMBEDDED_MIGRATIONS", "false");

        let short_code_length = parse_usize_or_default("SHORT_CODE_LENGTH", DEFAULT_CODE_LENGTH)?;
        if short_code_length == 0 || short_code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::InvalidValue(
                "SHORT_CODE_LENGTH".to_string(),
                format!("must be between 1 and {}", MAX_CODE_LENGTH),
            ));
        }

        let short_code_max_attempts =
            parse_usize_or_default("SHORT_CODE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if short_code_max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "SHORT_CODE_MAX_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let jwt_access_secret = get_required("JWT_ACCESS_SECRET")?;
        if jwt_access_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_ACCESS_SECRET".to_string(),
                "Secret must be at least 32 characters long".to_string(),
            ));
        }
        let jwt_audience = get_or_default("JWT_AUDIENCE", "foodgram");
        let jwt_issuer = get_or_default("JWT_ISSUER", "foodgram-auth");

        Ok(Self {
            bind_address,
            environment,
            rust_log,
            public_base_url,
            cors_allowed_origins,
            database_url,
            database_max_connections,
            database_min_connections,
            database_connect_timeout,
            database_idle_timeout,
            database_max_lifetime,
            disable_embedded_migrations,
            short_code_length,
            short_code_max_attempts,
            jwt_access_secret,
            jwt_audience,
            jwt_issuer,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Load the global configuration from the environment on first call.
/// A failed load leaves it unset so the caller can report the error.
pub fn load() -> Result<&'static AppConfig, ConfigError> {
    CONFIG.get_or_try_init(AppConfig::from_env)
}
