//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `SALESDESK_API_URL` is set, the environment is the only source and
//!    any invalid variable is an error
//! 2. Otherwise probes multiple paths for config files
//! 3. Supports JSON and TOML formats
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `SALESDESK_API_URL`: Deployed sales API URL (required)
//! - `SALESDESK_TIMEOUT_SECONDS`: Request timeout
//! - `SALESDESK_CACHE_TTL_SECONDS`: Dataset cache time-to-live
//! - `SALESDESK_CACHE_MAX_CAPACITY`: Dataset cache entry limit
//! - `SALESDESK_TIMEZONE`: IANA timezone for activity timestamps
//! - `SALESDESK_SUPER_USERS`: Comma separated names with full visibility
//! - `SALESDESK_LOG_LEVEL`: Default log filter
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./salesdesk.json` or `./salesdesk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use salesdesk_domain::{
    ApiConfig, CacheConfig, Config, DisplayConfig, LoggingConfig, Result, SalesDeskError,
};

/// Load configuration from the environment or, without
/// `SALESDESK_API_URL`, from the first config file found.
///
/// # Errors
/// Returns `SalesDeskError::Config` if:
/// - Neither source is present
/// - An environment variable or the file is invalid
/// - Validation fails
pub fn load() -> Result<Config> {
    find()?.ok_or_else(|| {
        SalesDeskError::Config("No config file found and SALESDESK_API_URL is not set".to_string())
    })
}

/// Like [`load`], but `Ok(None)` when neither `SALESDESK_API_URL` nor a
/// config file is present.
///
/// # Errors
/// Returns `SalesDeskError::Config` when the present source is invalid.
pub fn find() -> Result<Option<Config>> {
    if api_url_from_env().is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(Some(config));
    }
    tracing::debug!("SALESDESK_API_URL not set, probing config files");
    probe_config_paths().map(|path| load_from_file(Some(path))).transpose()
}

/// Load configuration from environment variables
///
/// Only `SALESDESK_API_URL` is required; everything else falls back to the
/// defaults.
///
/// # Errors
/// Returns `SalesDeskError::Config` if the URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = api_url_from_env().ok_or_else(|| {
        SalesDeskError::Config("Missing required environment variable: SALESDESK_API_URL".into())
    })?;
    load_from_env_with_url(base_url)
}

/// Environment configuration around an API URL supplied by the caller.
///
/// # Errors
/// Returns `SalesDeskError::Config` if a variable has an invalid value or
/// validation fails.
pub fn load_from_env_with_url(base_url: String) -> Result<Config> {
    let api_defaults = ApiConfig::default();
    let cache_defaults = CacheConfig::default();
    let display_defaults = DisplayConfig::default();

    let config = Config {
        api: ApiConfig {
            base_url,
            timeout_seconds: env_parse("SALESDESK_TIMEOUT_SECONDS", api_defaults.timeout_seconds)?,
        },
        cache: CacheConfig {
            ttl_seconds: env_parse("SALESDESK_CACHE_TTL_SECONDS", cache_defaults.ttl_seconds)?,
            max_capacity: env_parse("SALESDESK_CACHE_MAX_CAPACITY", cache_defaults.max_capacity)?,
        },
        display: DisplayConfig {
            timezone: std::env::var("SALESDESK_TIMEZONE").unwrap_or(display_defaults.timezone),
            super_users: env_list("SALESDESK_SUPER_USERS").unwrap_or(display_defaults.super_users),
        },
        logging: LoggingConfig {
            level: std::env::var("SALESDESK_LOG_LEVEL")
                .unwrap_or_else(|_| LoggingConfig::default().level),
        },
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SalesDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SalesDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SalesDeskError::Config(
                "No config file found and SALESDESK_API_URL is not set".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SalesDeskError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SalesDeskError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SalesDeskError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SalesDeskError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SalesDeskError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parents, and the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("salesdesk.json"),
        dir.join("salesdesk.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// `SALESDESK_API_URL`, trimmed; `None` when unset or blank.
fn api_url_from_env() -> Option<String> {
    std::env::var("SALESDESK_API_URL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse an optional environment variable, using `default` when unset.
///
/// # Errors
/// Returns `SalesDeskError::Config` when the value does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SalesDeskError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Comma separated list; `None` when unset or empty.
fn env_list(key: &str) -> Option<Vec<String>> {
    let values: Vec<String> = std::env::var(key)
        .ok()?
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    (!values.is_empty()).then_some(values)
}
