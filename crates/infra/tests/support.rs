//! Shared helpers for infra integration tests.

use salesdesk_domain::ApiConfig;
use salesdesk_infra::SheetApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client pointed at the mock server's `/exec` path.
pub fn client_for(server: &MockServer) -> SheetApiClient {
    SheetApiClient::from_config(&ApiConfig {
        base_url: format!("{}/exec", server.uri()),
        timeout_seconds: 5,
    })
    .expect("client should build")
}

/// `{status: 200, data}`
pub fn ok(data: Value) -> Value {
    json!({ "status": 200, "data": data })
}

/// `{status, message}`
pub fn failure(status: u16, message: &str) -> Value {
    json!({ "status": status, "message": message })
}

/// A solution row as the backend sends it: ids as numbers, prices as text.
pub fn lead_json(uid: &str, opportunity_id: u64, sales_name: &str, price: &str) -> Value {
    json!({
        "uid": uid,
        "opportunity_id": opportunity_id,
        "opportunity_name": format!("Opportunity {opportunity_id}"),
        "company_name": "PT Nusantara Data",
        "sales_name": sales_name,
        "stage": "Open",
        "sales_notes": "",
        "selling_price": price,
    })
}
