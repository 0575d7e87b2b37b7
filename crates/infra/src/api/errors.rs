//! API-specific error types
//!
//! Classifies transport failures of the sales API so callers can log them
//! with a stable category before folding them into an envelope.

use std::time::Duration;

use salesdesk_domain::SalesDeskError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Connection failures and timeouts
    Network,
    /// Non-2xx HTTP status
    Status,
    /// Body that is not a valid envelope
    Decode,
    /// Bad base URL or client setup
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Status { .. } => ApiErrorCategory::Status,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self.category() {
            ApiErrorCategory::Network => "network",
            ApiErrorCategory::Status => "status",
            ApiErrorCategory::Decode => "decode",
            ApiErrorCategory::Config => "config",
        }
    }
}

impl From<SalesDeskError> for ApiError {
    fn from(err: SalesDeskError) -> Self {
        match err {
            SalesDeskError::Decode(msg) => Self::Decode(msg),
            SalesDeskError::Config(msg) => Self::Config(msg),
            other => Self::Network(other.user_message()),
        }
    }
}

impl From<ApiError> for SalesDeskError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(_) | ApiError::Timeout(_) | ApiError::Status { .. } => {
                Self::Network(err.to_string())
            }
            ApiError::Decode(msg) => Self::Decode(msg),
            ApiError::Config(msg) => Self::Config(msg),
        }
    }
}
