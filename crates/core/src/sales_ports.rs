//! Port interface for the remote sales API
//!
//! The backend is an opaque spreadsheet script addressed by an `action`
//! query value. Dataset fetches report transport failures as errors so the
//! caller can decide how to degrade; every other action answers with an
//! [`Envelope`], where transport and decode failures are folded into a
//! status-500 envelope.

use async_trait::async_trait;
use salesdesk_domain::{
    ChangePasswordRequest, Dataset, Envelope, GroupInfo, LoginRequest, LumpSumPriceUpdate, Record,
    Result, SolutionPriceUpdate, StageUpdate,
};
use serde_json::Value;

/// Trait for sales API operations
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Names offered on the login screen.
    async fn sales_names(&self) -> Result<Vec<String>>;

    /// Fetch a group-scoped dataset; non-200 envelopes yield an empty list.
    async fn fetch_dataset(&self, dataset: Dataset, sales_group: &str) -> Result<Vec<Record>>;

    /// `?action=lead&<column>=<value>[&sales_group=<group>]`
    async fn search(
        &self,
        column: &str,
        value: &str,
        sales_group: Option<&str>,
    ) -> Envelope<Vec<Record>>;

    async fn validate_password(&self, request: &LoginRequest) -> Envelope<GroupInfo>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> Envelope<Value>;

    async fn update_by_sales(&self, update: &StageUpdate) -> Envelope<Value>;

    async fn update_solution_price(&self, update: &SolutionPriceUpdate) -> Envelope<Value>;

    async fn update_lump_sum_price(&self, update: &LumpSumPriceUpdate) -> Envelope<Value>;

    /// Drop any memoised responses. No-op for uncached implementations.
    fn clear_cache(&self) {}
}
