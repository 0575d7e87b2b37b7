//! # SalesDesk Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client for the spreadsheet-backed sales API
//! - A TTL cache decorator for dataset reads
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `salesdesk-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiError, SheetApiClient};
pub use cache::{CachedSalesApi, DatasetCacheConfig};
pub use errors::InfraError;
pub use http::HttpClient;
