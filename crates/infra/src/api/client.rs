//! HTTP client for the spreadsheet-backed sales API
//!
//! Every action is addressed as `?action=<name>` on a single base URL.
//! Reads are GETs with extra query pairs; writes POST a JSON body. The
//! backend answers with a `{status, message, data}` envelope regardless of
//! outcome, so transport and decode failures are folded into a status-500
//! envelope where the port expects one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use salesdesk_core::SalesApi;
use salesdesk_domain::{
    ApiConfig, ChangePasswordRequest, Dataset, Envelope, GroupInfo, LoginRequest,
    LumpSumPriceUpdate, Record, Result as DomainResult, SalesDeskError, SalesUser,
    SolutionPriceUpdate, StageUpdate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Configuration for the sales API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Deployed script URL, without the `action` parameter
    pub base_url: Url,
    /// Deadline for one request, response body included
    pub timeout: Duration,
}

impl ApiClientConfig {
    /// # Errors
    /// Returns `ApiError::Config` when the base URL does not parse.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(infra_error)?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }
}

/// Sales API client
pub struct SheetApiClient {
    http_client: HttpClient,
    config: ApiClientConfig,
}

impl SheetApiClient {
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let http_client =
            HttpClient::new(config.timeout, concat!("salesdesk/", env!("CARGO_PKG_VERSION")))
                .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client, config })
    }

    /// # Errors
    /// Returns error if the URL is invalid or the HTTP client cannot be
    /// created.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(ApiClientConfig::from_config(config)?)
    }

    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// `<base>?action=<action>&<params...>`, with every value URL-encoded.
    pub fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.config.base_url.clone();
        url.query_pairs_mut().append_pair("action", action).extend_pairs(params);
        url
    }

    /// Execute a GET action. Non-2xx HTTP statuses are errors.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not an envelope.
    #[instrument(skip(self, params), fields(action = %action))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.action_url(action, params);
        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, url.clone());
        let envelope = self.execute(request, &url, true).await?;

        info!(action = %action, status = envelope.status, "GET request completed");
        Ok(envelope)
    }

    /// Execute a POST action with a JSON body.
    ///
    /// With `require_success` unset, an envelope in a non-2xx response is
    /// still returned; the login and password actions report rejections
    /// that way.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not an envelope.
    #[instrument(skip(self, body), fields(action = %action))]
    pub async fn post<B, T>(
        &self,
        action: &str,
        body: &B,
        require_success: bool,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.action_url(action, &[]);
        debug!(url = %url, "POST request");

        let body = serde_json::to_vec(body)
            .map_err(|e| ApiError::Config(format!("Failed to serialize body: {e}")))?;
        let request = self
            .http_client
            .request(Method::POST, url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let envelope = self.execute(request, &url, require_success).await?;

        info!(action = %action, status = envelope.status, "POST request completed");
        Ok(envelope)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        require_success: bool,
    ) -> Result<Envelope<T>, ApiError> {
        let deadline = self.config.timeout;
        let response = match tokio::time::timeout(deadline, self.http_client.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => return Err(ApiError::Timeout(deadline)),
        };

        let status = response.status();
        let bytes = response.bytes().await.map_err(infra_error)?;

        if !status.is_success() {
            if !require_success {
                if let Ok(envelope) = serde_json::from_slice::<Envelope<T>>(&bytes) {
                    return Ok(envelope);
                }
            }
            return Err(Self::map_status_error(status, url));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_status_error(status: StatusCode, url: &Url) -> ApiError {
        ApiError::Status { status: status.as_u16(), url: url.to_string() }
    }

    fn fold<T>(action: &str, result: Result<Envelope<T>, ApiError>) -> Envelope<T> {
        result.unwrap_or_else(|err| {
            warn!(action = %action, category = err.label(), error = %err, "request failed");
            Envelope::transport_failure(err)
        })
    }
}

fn infra_error(err: impl Into<InfraError>) -> ApiError {
    SalesDeskError::from(err.into()).into()
}

#[async_trait]
impl SalesApi for SheetApiClient {
    async fn sales_names(&self) -> DomainResult<Vec<String>> {
        let envelope: Envelope<Vec<SalesUser>> =
            self.get(Dataset::SalesNames.label(), &[]).await?;
        if !envelope.is_success() {
            warn!(status = envelope.status, "sales names rejected");
            return Ok(Vec::new());
        }
        Ok(envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|user| user.name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        sales_group: &str,
    ) -> DomainResult<Vec<Record>> {
        let sales_group = sales_group.trim();
        if sales_group.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope<Vec<Record>> =
            self.get(dataset.label(), &[("sales_group", sales_group)]).await?;
        if !envelope.is_success() {
            warn!(dataset = %dataset, status = envelope.status, "dataset rejected");
            return Ok(Vec::new());
        }
        Ok(envelope.data.unwrap_or_default())
    }

    async fn search(
        &self,
        column: &str,
        value: &str,
        sales_group: Option<&str>,
    ) -> Envelope<Vec<Record>> {
        let mut params = vec![(column, value)];
        if let Some(group) = sales_group.filter(|g| !g.trim().is_empty()) {
            params.push(("sales_group", group));
        }
        Self::fold("lead", self.get("lead", &params).await)
    }

    async fn validate_password(&self, request: &LoginRequest) -> Envelope<GroupInfo> {
        Self::fold("validateAppPassword", self.post("validateAppPassword", request, false).await)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Envelope<Value> {
        Self::fold("changePassword", self.post("changePassword", request, false).await)
    }

    async fn update_by_sales(&self, update: &StageUpdate) -> Envelope<Value> {
        Self::fold("updateBySales", self.post("updateBySales", update, true).await)
    }

    async fn update_solution_price(&self, update: &SolutionPriceUpdate) -> Envelope<Value> {
        Self::fold("updateSolutionPrice", self.post("updateSolutionPrice", update, true).await)
    }

    async fn update_lump_sum_price(&self, update: &LumpSumPriceUpdate) -> Envelope<Value> {
        Self::fold("updateLumpSumPrice", self.post("updateLumpSumPrice", update, true).await)
    }
}
