//! Opportunity and solution line types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::record::Record;
use super::row_id::RowId;
use crate::impl_label_conversions;
use crate::utils::lenient;
use crate::{Result, SalesDeskError};

/// Sales stage of an opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Open,
    ClosedWon,
    ClosedLost,
}

impl_label_conversions!(Stage {
    Open => "Open",
    ClosedWon => "Closed Won",
    ClosedLost => "Closed Lost",
});

impl Stage {
    /// Every stage, in the order offered to the user.
    pub const ALL: [Self; 3] = [Self::Open, Self::ClosedWon, Self::ClosedLost];

    /// Parse a stage label, falling back to `Open` for unknown text.
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(lenient::value_text(&value).map(|s| Self::from_label_or_default(&s)).unwrap_or_default())
    }
}

/// Typed view of an opportunity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub opportunity_id: RowId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub opportunity_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sales_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company_name: String,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default, deserialize_with = "lenient::price")]
    pub selling_price: f64,
    #[serde(default, alias = "sales_note", deserialize_with = "lenient::text")]
    pub sales_notes: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pillar: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub solution: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub service: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub vertical_industry: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub responsible_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub channel: String,
}

impl Opportunity {
    /// Label used when offering the opportunity for selection.
    pub fn display_label(&self) -> String {
        let name = if self.opportunity_name.is_empty() { "N/A" } else { &self.opportunity_name };
        format!("{name} (ID: {})", self.opportunity_id)
    }
}

impl TryFrom<&Record> for Opportunity {
    type Error = SalesDeskError;

    fn try_from(record: &Record) -> Result<Self> {
        serde_json::from_value(Value::Object(record.as_map().clone()))
            .map_err(|e| SalesDeskError::Decode(format!("invalid opportunity row: {e}")))
    }
}

/// One priced component of an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionLine {
    pub uid: RowId,
    #[serde(default)]
    pub opportunity_id: RowId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub sales_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pillar: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub solution: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub selling_price: f64,
}

impl SolutionLine {
    /// Current price as the whole-number value offered for editing.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn editable_price(&self) -> u64 {
        if self.selling_price <= 0.0 {
            0
        } else {
            self.selling_price.trunc() as u64
        }
    }
}

impl TryFrom<&Record> for SolutionLine {
    type Error = SalesDeskError;

    fn try_from(record: &Record) -> Result<Self> {
        serde_json::from_value(Value::Object(record.as_map().clone()))
            .map_err(|e| SalesDeskError::Decode(format!("invalid solution line: {e}")))
    }
}
