//! Shared test helpers for `salesdesk-core` integration tests.
//!
//! The mock API keeps its data in memory and records every mutation so
//! service tests can focus on behaviour instead of HTTP plumbing.

pub mod sales_api;

use salesdesk_domain::Record;

/// A solution row as returned by the `leads` and `lead` actions.
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

/// An opportunity header row from `getOpportunities`.
pub fn opportunity(opportunity_id: &str, sales_name: &str) -> Record {
    Record::new()
        .with("opportunity_id", opportunity_id)
        .with("opportunity_name", format!("Opportunity {opportunity_id}"))
        .with("company_name", "PT Nusantara Data")
        .with("sales_name", sales_name)
        .with("stage", "Open")
}
