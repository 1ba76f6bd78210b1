//! Application settings: presets and environment overrides.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    ENV_APP_ENV, ENV_DEVELOPMENT, ENV_PRODUCTION, ENV_TESTING, SQLITE_MEMORY_MARKER,
    TESTING_DATABASE_URL,
};
use crate::errors::{AppError, AppResult};

/// Deployment environment selecting a configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            ENV_DEVELOPMENT | "dev" => Ok(Environment::Development),
            ENV_TESTING | "test" => Ok(Environment::Testing),
            ENV_PRODUCTION | "prod" => Ok(Environment::Production),
            other => Err(AppError::Config(format!("Unknown environment '{}'", other))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "{}", ENV_DEVELOPMENT),
            Environment::Testing => write!(f, "{}", ENV_TESTING),
            Environment::Production => write!(f, "{}", ENV_PRODUCTION),
        }
    }
}

/// Application configuration.
///
/// This is the settings object handed to the application factory.
/// Each application built from a `Config` owns its own copy.
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub max_connections: u32,
    /// Log every SQL statement issued by the ORM
    pub sqlx_logging: bool,
    /// Apply pending migrations when the database extension is bound
    pub run_migrations: bool,
    pub server_host: String,
    pub server_port: u16,
    /// Pretty-print JSON responses
    pub json_pretty: bool,
    /// Drop `null` fields from serialized objects
    pub json_omit_nulls: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("sqlx_logging", &self.sqlx_logging)
            .field("run_migrations", &self.run_migrations)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("json_pretty", &self.json_pretty)
            .field("json_omit_nulls", &self.json_omit_nulls)
            .finish()
    }
}

impl Config {
    /// Local development: file-backed SQLite, SQL logging, pretty JSON.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: true,
            run_migrations: true,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            json_pretty: true,
            json_omit_nulls: false,
        }
    }

    /// Tests: private in-memory SQLite database, single connection.
    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            database_url: TESTING_DATABASE_URL.to_string(),
            max_connections: 1,
            sqlx_logging: false,
            run_migrations: true,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            json_pretty: false,
            json_omit_nulls: false,
        }
    }

    /// Production: migrations are applied explicitly with `migrate up`.
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: false,
            run_migrations: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            json_pretty: false,
            json_omit_nulls: true,
        }
    }

    /// Preset for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::testing(),
            Environment::Production => Self::production(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `APP_ENV` picks the preset (development when unset or invalid),
    /// individual variables override its fields.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = env::var(ENV_APP_ENV)
            .ok()
            .and_then(|v| match v.parse::<Environment>() {
                Ok(env) => Some(env),
                Err(e) => {
                    tracing::warn!("{}, falling back to development", e);
                    None
                }
            })
            .unwrap_or(Environment::Development);

        let preset = Self::for_environment(environment);

        Self {
            environment,
            database_url: env::var("DATABASE_URL").unwrap_or(preset.database_url),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS").unwrap_or(preset.max_connections),
            sqlx_logging: env_flag("SQLX_LOGGING").unwrap_or(preset.sqlx_logging),
            run_migrations: env_flag("RUN_MIGRATIONS").unwrap_or(preset.run_migrations),
            server_host: env::var("SERVER_HOST").unwrap_or(preset.server_host),
            server_port: env_parse("SERVER_PORT").unwrap_or(preset.server_port),
            json_pretty: env_flag("JSON_PRETTY").unwrap_or(preset.json_pretty),
            json_omit_nulls: env_flag("JSON_OMIT_NULLS").unwrap_or(preset.json_omit_nulls),
        }
    }

    /// Reject settings the application factory cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(AppError::Config("DATABASE_URL must not be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        // Every pooled connection to an in-memory database opens its own database.
        if self.is_memory_database() && self.max_connections != 1 {
            return Err(AppError::Config(
                "In-memory SQLite requires DATABASE_MAX_CONNECTIONS=1".to_string(),
            ));
        }
        if self.server_host.trim().is_empty() {
            return Err(AppError::Config("SERVER_HOST must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether the database lives only for the lifetime of the pool.
    pub fn is_memory_database(&self) -> bool {
        self.database_url.starts_with("sqlite") && self.database_url.contains(SQLITE_MEMORY_MARKER)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::development()
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
