//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use salesdesk_core::{ActivityFormatter, SalesApi, SalesDeskService, VisibilityPolicy};
use salesdesk_domain::{Config, Result, SalesDeskError};
use salesdesk_infra::{config, CachedSalesApi, DatasetCacheConfig, SheetApiClient};
use tracing::info;

/// Application context - holds the configuration and the wired service
pub struct AppContext {
    pub config: Config,
    pub service: Arc<SalesDeskService>,
}

impl AppContext {
    /// Wire the HTTP client, dataset cache and service from `config`.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` when the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = SheetApiClient::from_config(&config.api)
            .map_err(|e| SalesDeskError::Config(e.to_string()))?;
        let api = CachedSalesApi::new(client, DatasetCacheConfig::from(&config.cache));
        Self::with_api(config, Arc::new(api))
    }

    /// Build the context around an existing API implementation.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Config` for an unknown display timezone.
    pub fn with_api(config: Config, api: Arc<dyn SalesApi>) -> Result<Self> {
        let formatter = ActivityFormatter::new(config.display.tz()?);
        let policy = VisibilityPolicy::new(config.display.super_users.iter().cloned());
        let service = SalesDeskService::new(api)
            .with_policy(policy)
            .with_activity_formatter(formatter);

        info!(
            timezone = %config.display.timezone,
            super_users = config.display.super_users.len(),
            "application context ready"
        );
        Ok(Self { config, service: Arc::new(service) })
    }
}

/// Resolve configuration from the CLI overrides and the loader.
///
/// An explicit `config_path` is always read. Otherwise the environment or
/// a probed file is used; when neither is present but `api_url` is given,
/// the remaining environment variables are applied around that URL.
///
/// # Errors
/// Returns `SalesDeskError::Config` when no usable configuration is found
/// or the one found is invalid.
pub fn resolve_config(config_path: Option<PathBuf>, api_url: Option<String>) -> Result<Config> {
    let mut config = match (config_path, &api_url) {
        (Some(path), _) => config::load_from_file(Some(path))?,
        (None, None) => config::load()?,
        (None, Some(url)) => match config::find()? {
            Some(config) => config,
            None => config::load_from_env_with_url(url.clone())?,
        },
    };

    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    config.validate()?;
    Ok(config)
}
