//! Untyped API rows
//!
//! Dataset actions return flat JSON objects whose column set depends on the
//! sheet. `Record` keeps them as an ordered map so tables can show every
//! column in the order the backend sent it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::lenient::{coerce_price, value_text};

/// One row returned by the sales API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column names in backend order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Text form of a cell; see [`value_text`].
    pub fn text(&self, column: &str) -> Option<String> {
        self.0.get(column).and_then(value_text)
    }

    /// Coerced numeric value of a price-like cell, `0.0` when absent.
    pub fn price(&self, column: &str) -> f64 {
        self.0.get(column).map_or(0.0, coerce_price)
    }

    pub fn sales_name(&self) -> Option<String> {
        self.text("sales_name")
    }

    pub fn opportunity_id(&self) -> Option<String> {
        self.text("opportunity_id").filter(|id| !id.is_empty())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_backend_column_order() {
        let record: Record =
            serde_json::from_value(json!({"stage": "Open", "opportunity_id": 7, "brand": "Cisco"}))
                .unwrap();
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["stage", "opportunity_id", "brand"]);
    }

    #[test]
    fn numeric_ids_read_as_text() {
        let record = Record::new().with("opportunity_id", 1024);
        assert_eq!(record.opportunity_id().as_deref(), Some("1024"));
    }

    #[test]
    fn blank_id_is_absent() {
        let record = Record::new().with("opportunity_id", "");
        assert_eq!(record.opportunity_id(), None);
    }

    #[test]
    fn price_defaults_to_zero() {
        let record = Record::new().with("selling_price", "n/a");
        assert_eq!(record.price("selling_price"), 0.0);
        assert_eq!(record.price("cost"), 0.0);
    }
}
