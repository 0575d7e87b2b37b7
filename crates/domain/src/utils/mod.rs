//! Domain utilities

pub mod lenient;
