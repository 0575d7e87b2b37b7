//! `{status, message, data}` response envelope

use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_OK, STATUS_TRANSPORT_FAILURE};
use crate::utils::lenient;
use crate::{Result, SalesDeskError};

/// Flat response envelope shared by every backend action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(deserialize_with = "lenient::status")]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

const fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    pub const fn ok(data: T) -> Self {
        Self { status: STATUS_OK, message: None, data: Some(data) }
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: Some(message.into()), data: None }
    }

    /// Generic status-500 envelope for transport and decode failures.
    pub fn transport_failure(detail: impl std::fmt::Display) -> Self {
        Self::failure(STATUS_TRANSPORT_FAILURE, format!("Request Error: {detail}"))
    }

    pub const fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Backend message, or `fallback` when the envelope carries none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback).to_string()
    }

    /// Convert into a `Result`, keeping the backend message verbatim on
    /// failure.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Backend` for any non-200 status.
    pub fn into_result(self, fallback: &str) -> Result<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            let message = self.message_or(fallback);
            Err(SalesDeskError::Backend { status: self.status, message })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_success_with_data() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_value(json!({"status": 200, "data": ["a", "b"]})).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.data.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn parses_string_status_and_missing_data() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_value(json!({"status": "401", "message": "Wrong password"})).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.data, None);
        let err = envelope.into_result("Login failed").unwrap_err();
        assert_eq!(err.user_message(), "Wrong password");
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let envelope: Envelope<()> = Envelope::failure(404, "");
        assert_eq!(envelope.message_or("Failed to update."), "Failed to update.");
    }

    #[test]
    fn transport_failure_is_status_500() {
        let envelope: Envelope<()> = Envelope::transport_failure("connection reset");
        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.message.as_deref(), Some("Request Error: connection reset"));
    }
}
