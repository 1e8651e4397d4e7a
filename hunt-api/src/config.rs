/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. A `.env` file in the working directory
/// is read first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 4567)
/// - `MONGO_URL`: Full MongoDB connection string (overrides `MONGO_ADDR`)
/// - `MONGO_ADDR`: MongoDB host, port 27017 is assumed (default: localhost)
/// - `MONGO_DB`: Database name (default: dev)
/// - `MONGO_MAX_POOL_SIZE`: Connection pool bound (default: 10)
/// - `MONGO_CONNECT_TIMEOUT_SECS`: Connect timeout (default: 10)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter (default: hunt_api=debug,hunt_shared=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use hunt_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use hunt_shared::db::client::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// MongoDB configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 4567,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("API_HOST").unwrap_or(defaults.api.host);
        let port = match lookup("API_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("API_PORT must be a port number: {}", e))?,
            None => defaults.api.port,
        };

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => defaults.api.cors_origins,
        };

        let url = match lookup("MONGO_URL") {
            Some(url) => url,
            None => {
                let addr = lookup("MONGO_ADDR").unwrap_or_else(|| "localhost".to_string());
                format!("mongodb://{}:27017", addr)
            }
        };

        let max_pool_size = match lookup("MONGO_MAX_POOL_SIZE") {
            Some(size) => size.parse::<u32>()?,
            None => defaults.database.max_pool_size,
        };

        let connect_timeout_seconds = match lookup("MONGO_CONNECT_TIMEOUT_SECS") {
            Some(secs) => secs.parse::<u64>()?,
            None => defaults.database.connect_timeout_seconds,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                database: lookup("MONGO_DB").unwrap_or_else(|| "dev".to_string()),
                max_pool_size,
                connect_timeout_seconds,
                ..DatabaseConfig::default()
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}
