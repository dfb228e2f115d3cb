//! User service configuration.
//!
//! Built once at startup and passed by reference to whatever needs it.

use std::env;

use common::{DatabaseConfig, ServerConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerConfig::default();
        let db_defaults = DatabaseConfig::default();

        let database_url = var("USER_SERVICE_DATABASE_URL")
            .or_else(|| var("DATABASE_URL"))
            .unwrap_or_else(|| {
                database_url_from_parts(
                    &var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                    &var("DB_PORT").unwrap_or_else(|| "5432".to_string()),
                    &var("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                    var("DB_PASSWORD").as_deref(),
                    &var("DB_NAME").unwrap_or_else(|| "user_db".to_string()),
                )
            });

        Self {
            server: ServerConfig {
                service_name: var("PROJECT_NAME").unwrap_or(server_defaults.service_name),
                host: var("USER_SERVICE_HOST").unwrap_or(server_defaults.host),
                port: var("USER_SERVICE_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(server_defaults.port),
                api_prefix: var("API_PREFIX")
                    .map(|p| p.trim_end_matches('/').to_string())
                    .unwrap_or(server_defaults.api_prefix),
                cors_origins: var("BACKEND_CORS_ORIGINS")
                    .map(|origins| parse_list(&origins))
                    .unwrap_or(server_defaults.cors_origins),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: var("DB_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(db_defaults.max_connections),
                min_connections: var("DB_MIN_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(db_defaults.min_connections),
                max_lifetime_seconds: var("DB_MAX_LIFETIME_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(db_defaults.max_lifetime_seconds),
            },
        }
    }
}

/// Assemble a PostgreSQL URL; the password segment is dropped when unset.
pub fn database_url_from_parts(
    host: &str,
    port: &str,
    user: &str,
    password: Option<&str>,
    name: &str,
) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name),
        None => format!("postgres://{}@{}:{}/{}", user, host, port, name),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
