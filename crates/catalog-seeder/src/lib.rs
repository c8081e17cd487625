//! # Catalog Seeder
//!
//! Fills a running catalog API with generated products.
//!
//! ## Features
//!
//! - Randomized products across the storefront categories
//! - Optional image URLs so the image host path is exercised
//! - Marks a random subset featured through the toggle endpoint

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod generator;

pub use client::CatalogClient;
pub use generator::{CATEGORIES, ProductGenerator};
