//! Sales API client
//!
//! HTTP implementation of the `SalesApi` port plus the error
//! classification used for its transport failures.

pub mod client;
pub mod errors;

pub use client::{ApiClientConfig, SheetApiClient};
pub use errors::{ApiError, ApiErrorCategory};
