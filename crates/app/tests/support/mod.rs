//! Scripted backend and shell driver for app tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use salesdesk_app::{AppContext, Shell};
use salesdesk_core::SalesApi;
use salesdesk_domain::{
    ChangePasswordRequest, Config, Dataset, Envelope, GroupInfo, LoginRequest, LumpSumPriceUpdate,
    Record, Result as DomainResult, SolutionPriceUpdate, StageUpdate,
};
use serde_json::Value;

pub const PASSWORD: &str = "rahasia";

/// Backend with one SMB group, two sales users and a fixed data set.
#[derive(Default)]
pub struct ScriptedApi {
    pub datasets: HashMap<Dataset, Vec<Record>>,
    pub rejected_uid: Option<String>,
    pub posted: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn standard() -> Self {
        let mut datasets = HashMap::new();
        datasets.insert(
            Dataset::Leads,
            vec![
                lead("U-1", "OPP-1", "Andi Wijaya", 1_500_000.0),
                lead("U-2", "OPP-1", "Andi Wijaya", 2_500_000.0),
                lead("U-3", "OPP-2", "Sari Dewi", 700_000.0),
            ],
        );
        datasets.insert(
            Dataset::LeadsBySales,
            vec![
                lead("U-1", "OPP-1", "Andi Wijaya", 1_500_000.0),
                lead("U-3", "OPP-2", "Sari Dewi", 700_000.0),
            ],
        );
        datasets.insert(
            Dataset::Opportunities,
            vec![opportunity("OPP-1", "Andi Wijaya"), opportunity("OPP-2", "Sari Dewi")],
        );
        datasets.insert(
            Dataset::ActivityLog,
            vec![
                activity("2024-03-01T02:00:00Z", "Opportunity OPP-1", "Open", "Closed Won"),
                activity("2024-03-02T02:00:00Z", "Opportunity OPP-2", "Open", "Closed Lost"),
            ],
        );
        datasets.insert(Dataset::Pillars, vec![Record::new().with("pillar", "Infrastructure")]);
        Self { datasets, ..Self::default() }
    }

    pub fn rejecting_price_for(mut self, uid: &str) -> Self {
        self.rejected_uid = Some(uid.to_string());
        self
    }

    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().clone()
    }
}

#[async_trait]
impl SalesApi for ScriptedApi {
    async fn sales_names(&self) -> DomainResult<Vec<String>> {
        Ok(vec!["Sari Dewi".into(), "Andi Wijaya".into()])
    }

    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        sales_group: &str,
    ) -> DomainResult<Vec<Record>> {
        if sales_group != "SMB" {
            return Ok(Vec::new());
        }
        Ok(self.datasets.get(&dataset).cloned().unwrap_or_default())
    }

    async fn search(&self, column: &str, value: &str, _: Option<&str>) -> Envelope<Vec<Record>> {
        let rows = self
            .datasets
            .get(&Dataset::Leads)
            .map(|rows| {
                rows.iter().filter(|r| r.text(column).as_deref() == Some(value)).cloned().collect()
            })
            .unwrap_or_default();
        Envelope::ok(rows)
    }

    async fn validate_password(&self, request: &LoginRequest) -> Envelope<GroupInfo> {
        if request.password == PASSWORD {
            Envelope::ok(GroupInfo { sales_group: "SMB".into(), sales_name: None })
        } else {
            Envelope::failure(401, "Invalid password")
        }
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Envelope<Value> {
        self.posted.lock().push(format!("passwd:{}", request.name));
        if request.old_password == PASSWORD {
            Envelope::ok(Value::Null)
        } else {
            Envelope::failure(400, "Old password is incorrect")
        }
    }

    async fn update_by_sales(&self, update: &StageUpdate) -> Envelope<Value> {
        let entry =
            format!("stage:{}:{}:{}", update.opportunity_id, update.stage, update.sales_notes);
        self.posted.lock().push(entry);
        Envelope::ok(Value::Null)
    }

    async fn update_solution_price(&self, update: &SolutionPriceUpdate) -> Envelope<Value> {
        self.posted.lock().push(format!("price:{}:{}", update.uid, update.selling_price));
        if self.rejected_uid.as_deref() == Some(update.uid.text().as_str()) {
            return Envelope::failure(500, "Row is locked");
        }
        Envelope::ok(Value::Null)
    }

    async fn update_lump_sum_price(&self, update: &LumpSumPriceUpdate) -> Envelope<Value> {
        let entry = format!(
            "lumpsum:{}:{}:{}",
            update.opportunity_id, update.selling_price, update.user
        );
        self.posted.lock().push(entry);
        Envelope { status: 200, message: Some("Price updated.".into()), data: None }
    }
}

pub fn lead(uid: &str, opportunity_id: &str, sales_name: &str, price: f64) -> Record {
    Record::new()
        .with("uid", uid)
        .with("opportunity_id", opportunity_id)
        .with("opportunity_name", format!("Opportunity {opportunity_id}"))
        .with("company_name", "PT Nusantara Data")
        .with("sales_name", sales_name)
        .with("pillar", "Infrastructure")
        .with("solution", "Backup")
        .with("brand", "Veeam")
        .with("stage", "Open")
        .with("sales_notes", "initial")
        .with("selling_price", price)
}

fn opportunity(opportunity_id: &str, sales_name: &str) -> Record {
    Record::new()
        .with("opportunity_id", opportunity_id)
        .with("opportunity_name", format!("Opportunity {opportunity_id}"))
        .with("company_name", "PT Nusantara Data")
        .with("sales_name", sales_name)
        .with("stage", "Open")
}

fn activity(timestamp: &str, name: &str, old: &str, new: &str) -> Record {
    Record::new()
        .with("Timestamp", timestamp)
        .with("OpportunityName", name)
        .with("OldValue", old)
        .with("NewValue", new)
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.api.base_url = "https://script.example.com/exec".into();
    config.display.super_users = vec!["Sari Dewi".into()];
    config
}

/// Feed `script` to a fresh shell and return everything it printed.
pub async fn run_script(api: Arc<ScriptedApi>, script: &str) -> String {
    let ctx = AppContext::with_api(test_config(), api).unwrap();
    let mut shell = Shell::new(ctx.service.clone(), script.as_bytes(), Vec::new());
    shell.run().await.unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}
