//! Shared helpers for integration tests.

use common::{DatabaseConfig, ServerConfig};
use user_service_lib::infra::Database;

/// Fresh in-memory SQLite database with migrations applied.
///
/// A single pooled connection keeps every statement on the same in-memory
/// database.
pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        max_lifetime_seconds: 3600,
    };

    Database::connect(&config)
        .await
        .expect("failed to open sqlite test database")
}

/// Server settings used by router tests.
#[allow(dead_code)]
pub fn test_server_config() -> ServerConfig {
    ServerConfig::default()
}
