//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SalesDesk
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SalesDeskError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SalesDeskError {
    /// Message suitable for showing inline to the user.
    ///
    /// Backend, login and validation messages are already worded for the
    /// user and are shown verbatim; transport and internal errors keep their
    /// category prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            Self::Auth(message)
            | Self::Session(message)
            | Self::InvalidInput(message)
            | Self::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Stable label suitable for logging fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Backend { .. } => "backend",
            Self::Auth(_) => "auth",
            Self::Session(_) => "session",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for SalesDesk operations
pub type Result<T> = std::result::Result<T, SalesDeskError>;
