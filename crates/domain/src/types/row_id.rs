//! Row identifiers kept in the form the backend sent them
//!
//! Sheet ids arrive as numbers or strings depending on the cell. Lookups
//! compare the text form, while request bodies echo the original JSON value
//! so a numeric id is posted back as a number.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::lenient::value_text;

/// Opportunity id or solution uid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Value);

impl RowId {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Text form used for matching user input; `null` is empty.
    pub fn text(&self) -> String {
        value_text(&self.0).unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq<str> for RowId {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for RowId {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

impl From<Value> for RowId {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<RowId> for Value {
    fn from(id: RowId) -> Self {
        id.0
    }
}
