use std::env;

use libsql::{Builder, Connection, Database};
use tracing::info;

use crate::error::{AtlasError, Result};

/// True when the hosted database connection settings are present.
pub fn hosted_config_present() -> bool {
    env::var("LIBSQL_URL").is_ok() && env::var("LIBSQL_AUTH_TOKEN").is_ok()
}

pub struct DatabaseManager {
    db: Database,
}

impl DatabaseManager {
    /// Create a new database manager with a connection to Turso
    pub async fn new() -> Result<Self> {
        let url = env::var("LIBSQL_URL").map_err(|_| AtlasError::Database {
            message: "LIBSQL_URL environment variable not set".to_string(),
        })?;

        let auth_token = env::var("LIBSQL_AUTH_TOKEN").map_err(|_| AtlasError::Database {
            message: "LIBSQL_AUTH_TOKEN environment variable not set".to_string(),
        })?;

        info!("Connecting to Turso database at {}", url);

        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AtlasError::Database {
                message: format!("Failed to connect to database: {e}"),
            })?;

        Ok(Self { db })
    }

    /// Get a connection to the database
    pub async fn get_connection(&self) -> Result<Connection> {
        self.db.connect().map_err(|e| AtlasError::Database {
            message: format!("Failed to get database connection: {e}"),
        })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection().await?;

        let migration_sql = include_str!("../migrations/001_create_places.sql");
        conn.execute_batch(migration_sql)
            .await
            .map_err(|e| AtlasError::Database {
                message: format!("Failed to run places migration: {e}"),
            })?;

        Ok(())
    }
}
