//! # SalesDesk App
//!
//! Interactive terminal front end for the sales dashboard.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - The line-oriented shell and its commands
//! - Plain-text table rendering
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - `main` is the only place that talks to the real terminal

pub mod context;
pub mod render;
pub mod shell;
pub mod utils;

// Re-export for convenience
pub use context::{resolve_config, AppContext};
pub use shell::{Flow, Shell};
