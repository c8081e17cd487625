//! # HTTP Schema Module
//!
//! Request and response bodies for the catalog API.

pub mod inputs;
pub mod objects;

// Re-export all types
pub use inputs::*;
pub use objects::*;
