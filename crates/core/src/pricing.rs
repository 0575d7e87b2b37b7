//! Sequential bulk price updates for solution lines

use std::collections::HashMap;

use salesdesk_domain::{Result, RowId, SalesDeskError, SolutionLine, SolutionPriceUpdate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::sales_ports::SalesApi;

/// Progress notification emitted after each line is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkProgress<'a> {
    /// 1-based position of the line just processed.
    pub position: usize,
    pub total: usize,
    pub uid: &'a RowId,
    pub succeeded: bool,
}

/// Outcome of a bulk update. `succeeded + failed.len() == total` always.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkUpdateReport {
    pub total: usize,
    pub succeeded: usize,
    /// `(uid, message)` for every rejected update.
    pub failed: Vec<(String, String)>,
}

impl BulkUpdateReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build one update per line, taking the new price from `overrides` when
/// present and the line's current price otherwise.
///
/// # Errors
/// Returns `SalesDeskError::InvalidInput` when an override names a uid that
/// is not among `lines`.
pub fn plan_price_updates(
    lines: &[SolutionLine],
    overrides: &[(String, u64)],
) -> Result<Vec<SolutionPriceUpdate>> {
    let mut requested: HashMap<&str, u64> = HashMap::new();
    for (uid, price) in overrides {
        if !lines.iter().any(|line| line.uid == uid.as_str()) {
            return Err(SalesDeskError::InvalidInput(format!(
                "Solution '{uid}' does not belong to this opportunity."
            )));
        }
        requested.insert(uid.as_str(), *price);
    }

    Ok(lines
        .iter()
        .map(|line| SolutionPriceUpdate {
            uid: line.uid.clone(),
            selling_price: requested
                .get(line.uid.text().as_str())
                .copied()
                .unwrap_or_else(|| line.editable_price()),
        })
        .collect())
}

/// Post every update in order, counting successes and failures.
///
/// A failure never stops the run; each item gets exactly one attempt.
pub async fn run_bulk_update(
    api: &dyn SalesApi,
    updates: &[SolutionPriceUpdate],
    progress: &mut (dyn FnMut(BulkProgress<'_>) + Send),
) -> BulkUpdateReport {
    let total = updates.len();
    let mut report = BulkUpdateReport { total, ..BulkUpdateReport::default() };

    for (index, update) in updates.iter().enumerate() {
        let response = api.update_solution_price(update).await;
        let succeeded = response.is_success();
        if succeeded {
            report.succeeded += 1;
            debug!(uid = %update.uid, price = update.selling_price, "solution price updated");
        } else {
            let message = response.message_or("Failed to update solution price.");
            warn!(
                uid = %update.uid,
                status = response.status,
                %message,
                "solution price update failed"
            );
            report.failed.push((update.uid.to_string(), message));
        }
        progress(BulkProgress { position: index + 1, total, uid: &update.uid, succeeded });
    }

    info!(
        total,
        succeeded = report.succeeded,
        failed = report.failed_count(),
        "bulk price update finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use salesdesk_domain::Record;

    use super::*;

    fn line(uid: &str, price: f64) -> SolutionLine {
        SolutionLine::try_from(&Record::new().with("uid", uid).with("selling_price", price))
            .unwrap()
    }

    #[test]
    fn plan_keeps_current_price_for_untouched_lines() {
        let lines = vec![line("U-1", 1000.0), line("U-2", 2500.7)];
        let plan = plan_price_updates(&lines, &[("U-1".to_string(), 1200)]).unwrap();
        assert_eq!(
            plan,
            vec![
                SolutionPriceUpdate { uid: "U-1".into(), selling_price: 1200 },
                SolutionPriceUpdate { uid: "U-2".into(), selling_price: 2500 },
            ]
        );
    }

    #[test]
    fn plan_rejects_unknown_uid() {
        let lines = vec![line("U-1", 1000.0)];
        let err = plan_price_updates(&lines, &[("U-9".to_string(), 1)]).unwrap_err();
        assert!(matches!(err, SalesDeskError::InvalidInput(_)));
    }

    #[test]
    fn empty_report_is_complete() {
        let report = BulkUpdateReport::default();
        assert!(report.is_complete_success());
        assert_eq!(report.failed_count(), 0);
    }
}
