//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use salesdesk_domain::SalesDeskError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SalesDeskError);

impl From<InfraError> for SalesDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SalesDeskError> for InfraError {
    fn from(value: SalesDeskError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSalesDeskError {
    fn into_salesdesk(self) -> SalesDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SalesDeskError */
/* -------------------------------------------------------------------------- */

impl IntoSalesDeskError for HttpError {
    fn into_salesdesk(self) -> SalesDeskError {
        if self.is_timeout() {
            return SalesDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SalesDeskError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return SalesDeskError::Decode(format!("HTTP response body is not valid: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => SalesDeskError::Auth(message),
                404 => SalesDeskError::NotFound(message),
                400..=499 => SalesDeskError::InvalidInput(message),
                _ => SalesDeskError::Network(message),
            };
        }

        SalesDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_salesdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → SalesDeskError */
/* -------------------------------------------------------------------------- */

impl IntoSalesDeskError for JsonError {
    fn into_salesdesk(self) -> SalesDeskError {
        let (line, column) = (self.line(), self.column());
        SalesDeskError::Decode(format!("invalid JSON at line {line} column {column}: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_salesdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → SalesDeskError */
/* -------------------------------------------------------------------------- */

impl IntoSalesDeskError for UrlError {
    fn into_salesdesk(self) -> SalesDeskError {
        SalesDeskError::Config(format!("invalid API URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        Self(value.into_salesdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: SalesDeskError = InfraError::from(error).into();
        match mapped {
            SalesDeskError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn json_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: SalesDeskError = InfraError::from(err).into();
        assert!(matches!(mapped, SalesDeskError::Decode(msg) if msg.contains("line 1")));
    }

    #[test]
    fn url_error_maps_to_config() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: SalesDeskError = InfraError::from(err).into();
        assert!(matches!(mapped, SalesDeskError::Config(_)));
    }
}
