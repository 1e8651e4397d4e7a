/// MongoDB connection management
///
/// Builds a driver client from a [`DatabaseConfig`], verifies connectivity
/// with a `ping`, and hands back the `Database` handle the store wraps. The
/// driver pools connections internally; the pool bounds are configured here.
///
/// # Example
///
/// ```rust,ignore
/// use hunt_shared::db::client::{create_database, DatabaseConfig};
///
/// let config = DatabaseConfig {
///     url: "mongodb://localhost:27017".to_string(),
///     database: "dev".to_string(),
///     ..Default::default()
/// };
///
/// let db = create_database(config).await?;
/// ```

use crate::models::{hunt::Hunt, task::Task};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the MongoDB client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string (e.g., "mongodb://localhost:27017")
    pub url: String,

    /// Database holding the `hunts` and `tasks` collections
    pub database: String,

    /// Maximum number of pooled connections per server
    ///
    /// Default: 10
    pub max_pool_size: u32,

    /// Minimum number of idle connections to keep warm
    ///
    /// Default: 0
    pub min_pool_size: u32,

    /// Timeout for establishing a connection and selecting a server (seconds)
    ///
    /// Default: 10 seconds
    pub connect_timeout_seconds: u64,

    /// Application name reported to the server
    pub app_name: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "dev".to_string(),
            max_pool_size: 10,
            min_pool_size: 0,
            connect_timeout_seconds: 10,
            app_name: Some("hunt-api".to_string()),
        }
    }
}

/// Connects to MongoDB and returns the configured database
///
/// # Errors
///
/// Returns an error if:
/// - The connection string is invalid
/// - No server is reachable within the timeout
/// - The health check fails
pub async fn create_database(config: DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    info!(
        database = %config.database,
        max_pool_size = config.max_pool_size,
        connect_timeout_seconds = config.connect_timeout_seconds,
        "Connecting to MongoDB"
    );

    let timeout = Duration::from_secs(config.connect_timeout_seconds);

    let mut options = ClientOptions::parse(&config.url).await?;
    options.app_name = config.app_name.clone();
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);

    health_check(&database).await?;

    info!("MongoDB connection established");
    Ok(database)
}

/// Performs a health check on the database connection
pub async fn health_check(database: &Database) -> Result<(), mongodb::error::Error> {
    debug!("Performing database health check");
    database.run_command(doc! { "ping": 1 }).await?;
    debug!("Database health check passed");
    Ok(())
}

/// Creates the indexes the list queries rely on
///
/// Safe to call on every startup; existing indexes are left as they are.
pub async fn ensure_indexes(database: &Database) -> Result<(), mongodb::error::Error> {
    database
        .collection::<mongodb::bson::Document>(Task::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "huntId": 1, "position": 1 })
                .options(IndexOptions::builder().name("huntId_position".to_string()).build())
                .build(),
        )
        .await?;

    database
        .collection::<mongodb::bson::Document>(Hunt::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "title": 1 })
                .options(IndexOptions::builder().name("title".to_string()).build())
                .build(),
        )
        .await?;

    info!("MongoDB indexes ensured");
    Ok(())
}
