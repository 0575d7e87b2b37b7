//! Single-attempt `reqwest` sender for the sales API
//!
//! Each request is sent exactly once. Non-2xx responses are handed back
//! to the caller untouched; only transport failures become errors.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, IntoUrl, Method, RequestBuilder, Response};
use salesdesk_domain::SalesDeskError;
use tracing::debug;

use crate::errors::InfraError;

/// `reqwest` client with the per-request timeout and user agent applied.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// # Errors
    /// Returns `SalesDeskError::Network` when the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SalesDeskError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .no_proxy()
            .build()
            .map_err(to_domain)?;
        Ok(Self { client })
    }

    pub fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send `builder` once.
    ///
    /// # Errors
    /// Returns the mapped transport error when no response arrives.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SalesDeskError> {
        let request = builder.build().map_err(to_domain)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(to_domain(err))
            }
        }
    }
}

fn to_domain(err: reqwest::Error) -> SalesDeskError {
    SalesDeskError::from(InfraError::from(err))
}
