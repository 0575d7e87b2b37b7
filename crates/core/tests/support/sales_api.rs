//! In-memory mock for the `SalesApi` port

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use salesdesk_core::SalesApi;
use salesdesk_domain::{
    ChangePasswordRequest, Dataset, Envelope, GroupInfo, LoginRequest, LumpSumPriceUpdate, Record,
    Result as DomainResult, SalesDeskError, SolutionPriceUpdate, StageUpdate,
};
use serde_json::Value;

/// Mutations the mock has received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ChangePassword(String),
    Stage(StageUpdate),
    Price(SolutionPriceUpdate),
    LumpSum(LumpSumPriceUpdate),
}

/// In-memory `SalesApi`.
///
/// Search answers with every stored `leads` row whose column matches the
/// value exactly, ignoring the group.
#[derive(Default)]
pub struct MockSalesApi {
    names: Vec<String>,
    datasets: HashMap<Dataset, Vec<Record>>,
    password: Option<String>,
    login_group: GroupInfo,
    offline: bool,
    rejected_uids: HashSet<String>,
    calls: Mutex<Vec<Call>>,
    cache_clears: AtomicUsize,
}

impl MockSalesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn with_dataset(mut self, dataset: Dataset, rows: Vec<Record>) -> Self {
        self.datasets.insert(dataset, rows);
        self
    }

    /// Accept `password` and answer with `group`.
    pub fn with_login(mut self, password: &str, group: GroupInfo) -> Self {
        self.password = Some(password.to_string());
        self.login_group = group;
        self
    }

    /// Fail every dataset fetch as if the backend were unreachable.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn rejecting_price_for(mut self, uid: &str) -> Self {
        self.rejected_uids.insert(uid.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn cache_clears(&self) -> usize {
        self.cache_clears.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl SalesApi for MockSalesApi {
    async fn sales_names(&self) -> DomainResult<Vec<String>> {
        if self.offline {
            return Err(SalesDeskError::Network("connection refused".into()));
        }
        Ok(self.names.clone())
    }

    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        _sales_group: &str,
    ) -> DomainResult<Vec<Record>> {
        if self.offline {
            return Err(SalesDeskError::Network("connection refused".into()));
        }
        Ok(self.datasets.get(&dataset).cloned().unwrap_or_default())
    }

    async fn search(
        &self,
        column: &str,
        value: &str,
        _sales_group: Option<&str>,
    ) -> Envelope<Vec<Record>> {
        if self.offline {
            return Envelope::transport_failure("connection refused");
        }
        let rows = self
            .datasets
            .get(&Dataset::Leads)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.text(column).as_deref() == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Envelope::ok(rows)
    }

    async fn validate_password(&self, request: &LoginRequest) -> Envelope<GroupInfo> {
        match &self.password {
            Some(expected) if *expected == request.password => {
                Envelope::ok(self.login_group.clone())
            }
            _ => Envelope::failure(401, "Invalid password"),
        }
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Envelope<Value> {
        self.record(Call::ChangePassword(request.name.clone()));
        if self.password.as_deref() == Some(request.old_password.as_str()) {
            Envelope::failure(200, "Password updated")
        } else {
            Envelope::failure(403, "Old password does not match")
        }
    }

    async fn update_by_sales(&self, update: &StageUpdate) -> Envelope<Value> {
        self.record(Call::Stage(update.clone()));
        Envelope::failure(200, "Opportunity updated")
    }

    async fn update_solution_price(&self, update: &SolutionPriceUpdate) -> Envelope<Value> {
        self.record(Call::Price(update.clone()));
        if self.rejected_uids.contains(&update.uid.text()) {
            Envelope::failure(400, format!("Row {} is locked", update.uid))
        } else {
            Envelope::ok(Value::Null)
        }
    }

    async fn update_lump_sum_price(&self, update: &LumpSumPriceUpdate) -> Envelope<Value> {
        self.record(Call::LumpSum(update.clone()));
        Envelope::failure(200, "")
    }

    fn clear_cache(&self) {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
    }
}
