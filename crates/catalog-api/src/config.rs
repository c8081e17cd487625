//! # API Configuration
//!
//! Environment-based configuration for the catalog API service.

use std::env;
use std::net::SocketAddr;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// ScyllaDB configuration
    pub scylla: ScyllaConfig,

    /// Redis configuration
    pub redis: RedisConfig,

    /// Image host credentials
    pub cloudinary: CloudinaryConfig,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// ScyllaDB connection configuration
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub replication_factor: u32,
}

/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Cloudinary credentials
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Panics
    ///
    /// Panics when `SERVER_ADDR` is set but is not a socket address.
    pub fn from_env() -> Self {
        Self {
            server_addr: env::var("SERVER_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
                .parse()
                .expect("Invalid SERVER_ADDR"),

            scylla: ScyllaConfig {
                hosts: split_list(
                    &env::var("SCYLLA_HOSTS").unwrap_or_else(|_| "127.0.0.1:9042".to_string()),
                ),
                keyspace: env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "catalog".to_string()),
                username: env::var("SCYLLA_USERNAME").ok(),
                password: env::var("SCYLLA_PASSWORD").ok(),
                replication_factor: env::var("SCYLLA_REPLICATION_FACTOR")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1),
            },

            redis: RedisConfig {
                url: env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            },

            cloudinary: CloudinaryConfig {
                cloud_name: env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
                api_key: env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
                api_secret: env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            },

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            cors_origins: split_list(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string())),
        }
    }
}

impl From<ScyllaConfig> for catalog_persistence::ScyllaConfig {
    fn from(c: ScyllaConfig) -> Self {
        Self {
            hosts: c.hosts,
            keyspace: c.keyspace,
            username: c.username,
            password: c.password,
            replication_factor: c.replication_factor,
        }
    }
}

impl From<RedisConfig> for catalog_persistence::CacheConfig {
    fn from(c: RedisConfig) -> Self {
        Self { url: c.url }
    }
}

impl From<CloudinaryConfig> for catalog_persistence::CloudinaryConfig {
    fn from(c: CloudinaryConfig) -> Self {
        Self {
            cloud_name: c.cloud_name,
            api_key: c.api_key,
            api_secret: c.api_secret,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
