pub mod entities;
pub mod migrator;
pub mod repositories;

#[cfg(test)]
pub mod testing;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./accounts.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./accounts.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url.clone());
        opts.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .sqlx_logging(false);
        opts
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(config.connect_options()).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Connect to the database, retrying while it is unavailable.
///
/// Connection-level failures are retried with backoff; anything else
/// (bad URL, unsupported driver) fails immediately.
pub async fn wait_for_database(
    config: &DatabaseConfig,
    retry: RetryConfig,
) -> Result<DatabaseConnection, DbErr> {
    info!("Waiting for database...");
    let db = retry_with_backoff(
        retry,
        || async move {
            let db = init_database(config).await?;
            db.ping().await?;
            Ok::<_, DbErr>(db)
        },
        is_connection_error,
        "wait_for_database",
    )
    .await?;
    info!("Database available!");
    Ok(db)
}

fn is_connection_error(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_for_database_connects_to_sqlite() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..DatabaseConfig::default()
        };
        let db = wait_for_database(&config, RetryConfig::default()).await.unwrap();
        assert!(db.ping().await.is_ok());
    }

    #[test]
    fn sqlite_helper_builds_rwc_url() {
        let config = DatabaseConfig::sqlite("/tmp/accounts.db");
        assert_eq!(config.url, "sqlite:///tmp/accounts.db?mode=rwc");
    }
}
