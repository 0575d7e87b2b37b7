//! Per-opportunity price rollups
//!
//! The opportunities payload carries one row per deal; the leads payload
//! carries one row per solution line. Joining them on `opportunity_id`
//! adds the line count and the summed selling price to each deal.

use std::collections::{HashMap, HashSet};

use salesdesk_domain::{Record, Stage};
use serde::Serialize;

/// Opportunity row enriched with its solution-line totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityTotal {
    pub opportunity_id: String,
    pub opportunity_name: String,
    pub company_name: String,
    pub sales_name: String,
    pub stage: Stage,
    pub line_count: usize,
    pub total_selling_price: f64,
}

impl OpportunityTotal {
    /// Flatten back into a row for tabular display.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("opportunity_id", self.opportunity_id.clone())
            .with("opportunity_name", self.opportunity_name.clone())
            .with("company_name", self.company_name.clone())
            .with("sales_name", self.sales_name.clone())
            .with("stage", self.stage.label())
            .with("line_count", self.line_count)
            .with("selling_price", self.total_selling_price)
    }
}

/// Join `opportunities` with `lines` by `opportunity_id`.
///
/// Output follows `opportunities` order, skipping rows without an id and
/// repeated ids. Lines pointing at unknown opportunities are ignored.
pub fn merge_totals(opportunities: &[Record], lines: &[Record]) -> Vec<OpportunityTotal> {
    let mut rollup: HashMap<String, (usize, f64)> = HashMap::new();
    for line in lines {
        if let Some(id) = line.opportunity_id() {
            let entry = rollup.entry(id).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += line.price("selling_price");
        }
    }

    let mut emitted = HashSet::new();
    opportunities
        .iter()
        .filter_map(|opportunity| {
            let id = opportunity.opportunity_id()?;
            if !emitted.insert(id.clone()) {
                return None;
            }
            let (line_count, total_selling_price) = rollup.get(&id).copied().unwrap_or((0, 0.0));
            Some(OpportunityTotal {
                opportunity_name: opportunity.text("opportunity_name").unwrap_or_default(),
                company_name: opportunity.text("company_name").unwrap_or_default(),
                sales_name: opportunity.sales_name().unwrap_or_default(),
                stage: opportunity
                    .text("stage")
                    .map(|s| Stage::from_label_or_default(&s))
                    .unwrap_or_default(),
                opportunity_id: id,
                line_count,
                total_selling_price,
            })
        })
        .collect()
}
