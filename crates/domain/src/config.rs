//! Configuration management

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_MAX_CAPACITY, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_SUPER_USERS,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_TIMEZONE,
};
use crate::{Result, SalesDeskError};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sales API endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Deployed spreadsheet script URL; actions are appended as `?action=`.
    pub base_url: String,
    /// Each request is sent once and abandoned after this many seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Response cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub max_capacity: u64,
}

/// Presentation and visibility configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA timezone used to render activity timestamps.
    pub timezone: String,
    /// Names that see every record of their group.
    pub super_users: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: String::new(), timeout_seconds: DEFAULT_TIMEOUT_SECONDS }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: DEFAULT_CACHE_TTL_SECONDS, max_capacity: DEFAULT_CACHE_MAX_CAPACITY }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            super_users: DEFAULT_SUPER_USERS.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

impl DisplayConfig {
    /// Parsed display timezone.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` for unknown timezone names.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            SalesDeskError::Config(format!("Unknown timezone '{}': {e}", self.timezone))
        })
    }
}

impl Config {
    /// Check cross-field constraints after loading.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` when the base URL is not http(s),
    /// the timezone is unknown, or a timeout or TTL is zero.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| {
            SalesDeskError::Config(format!("Invalid API base URL '{}': {e}", self.api.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SalesDeskError::Config(format!(
                "API base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(SalesDeskError::Config("api.timeout_seconds must be positive".into()));
        }
        if self.cache.ttl_seconds == 0 {
            return Err(SalesDeskError::Config("cache.ttl_seconds must be positive".into()));
        }
        self.display.tz()?;
        Ok(())
    }
}
