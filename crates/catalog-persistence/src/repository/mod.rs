//! # Repository Module
//!
//! Catalog store implementations.

pub mod memory;
#[cfg(feature = "scylla")]
pub mod scylla_impl;
pub mod traits;

pub use memory::InMemoryProductRepository;
#[cfg(feature = "scylla")]
pub use scylla_impl::{ScyllaClient, ScyllaConfig, ScyllaProductRepository};
pub use traits::{ProductRepository, SharedProductRepository};
