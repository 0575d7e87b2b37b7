//! Activity log entries

use serde::{Deserialize, Serialize};

use crate::utils::lenient;

/// Read-only history row from `getSalesActivityLog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityLogEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub opportunity_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub old_value: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub new_value: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_pascal_case_columns() {
        let entry: ActivityLogEntry = serde_json::from_value(json!({
            "Timestamp": "2024-05-02T03:15:00.000Z",
            "OpportunityName": "Core Refresh",
            "OldValue": "Open",
            "NewValue": "Closed Won"
        }))
        .unwrap();
        assert_eq!(entry.opportunity_name, "Core Refresh");
        assert_eq!(entry.new_value, "Closed Won");
    }
}
