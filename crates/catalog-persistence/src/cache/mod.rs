//! # Cache Module
//!
//! Key-value cache holding the serialized featured-products snapshot.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_client;

pub use memory::InMemorySnapshotCache;
#[cfg(feature = "redis")]
pub use redis_client::{CacheClient, CacheConfig};

/// Text-valued key-value cache. Values never expire.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Get the value stored under `key`, `None` on a miss
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key` without expiration, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Shared cache handle
pub type SharedSnapshotCache = Arc<dyn SnapshotCache>;
