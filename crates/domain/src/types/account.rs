//! Login, session and mutation payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opportunity::Stage;
use super::row_id::RowId;
use crate::constants::DEFAULT_SALES_NAME;
use crate::utils::lenient;

/// Entry of the `getSalesNames` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesUser {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
}

/// Group information returned by a successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub sales_group: String,
    #[serde(default)]
    pub sales_name: Option<String>,
}

impl GroupInfo {
    pub fn new(sales_group: impl Into<String>, sales_name: impl Into<String>) -> Self {
        Self { sales_group: sales_group.into(), sales_name: Some(sales_name.into()) }
    }

    /// Name shown in greetings and used for row filtering.
    pub fn display_name(&self) -> &str {
        self.sales_name.as_deref().filter(|n| !n.is_empty()).unwrap_or(DEFAULT_SALES_NAME)
    }

    pub fn has_group(&self) -> bool {
        !self.sales_group.trim().is_empty()
    }
}

/// Body of `validateAppPassword`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `changePassword`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub name: String,
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("name", &self.name)
            .field("old_password", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Body of `updateBySales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageUpdate {
    pub opportunity_id: RowId,
    pub sales_notes: String,
    pub stage: Stage,
}

/// Body of `updateSolutionPrice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionPriceUpdate {
    pub uid: RowId,
    pub selling_price: u64,
}

/// Body of `updateLumpSumPrice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LumpSumPriceUpdate {
    pub opportunity_id: RowId,
    pub selling_price: u64,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Opportunity, Record, SolutionLine};

    #[test]
    fn group_info_reads_camel_case() {
        let body = json!({"salesGroup": "ENTERPRISE", "salesName": "Budiono Untoro"});
        let info: GroupInfo = serde_json::from_value(body).unwrap();
        assert_eq!(info.sales_group, "ENTERPRISE");
        assert_eq!(info.display_name(), "Budiono Untoro");
        assert!(info.has_group());
    }

    #[test]
    fn group_info_without_name_greets_user() {
        let info: GroupInfo = serde_json::from_value(json!({"salesGroup": "SMB"})).unwrap();
        assert_eq!(info.display_name(), "User");
    }

    #[test]
    fn login_request_omits_absent_name_and_hides_password() {
        let request = LoginRequest { name: None, password: "s3cret".into() };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"password": "s3cret"}));
        assert!(!format!("{request:?}").contains("s3cret"));
    }

    #[test]
    fn change_password_uses_backend_keys() {
        let request = ChangePasswordRequest {
            name: "Lie Suherman".into(),
            old_password: "old".into(),
            new_password: "new".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Lie Suherman", "oldPassword": "old", "newPassword": "new"})
        );
    }

    #[test]
    fn stage_update_serializes_stage_label() {
        let update = StageUpdate {
            opportunity_id: "42".into(),
            sales_notes: "Waiting for PO".into(),
            stage: Stage::ClosedLost,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"opportunity_id": "42", "sales_notes": "Waiting for PO", "stage": "Closed Lost"})
        );
    }

    #[test]
    fn numeric_ids_are_posted_back_as_numbers() {
        let row = Record::new()
            .with("opportunity_id", 88)
            .with("uid", 7)
            .with("sales_notes", "")
            .with("selling_price", 1);
        let opportunity = Opportunity::try_from(&row).unwrap();
        let line = SolutionLine::try_from(&row).unwrap();

        let stage = StageUpdate {
            opportunity_id: opportunity.opportunity_id,
            sales_notes: opportunity.sales_notes,
            stage: Stage::ClosedWon,
        };
        assert_eq!(serde_json::to_value(&stage).unwrap()["opportunity_id"], json!(88));

        let price = SolutionPriceUpdate { uid: line.uid.clone(), selling_price: line.editable_price() };
        assert_eq!(serde_json::to_value(&price).unwrap(), json!({"uid": 7, "selling_price": 1}));
    }
}
