//! Sales desk service - core business logic
//!
//! One method per dashboard view. Reads degrade to empty lists when the
//! backend is unreachable; writes surface the backend message verbatim.

use std::collections::HashSet;
use std::sync::Arc;

use salesdesk_domain::{
    ActivityLogEntry, ChangePasswordRequest, Dataset, GroupInfo, LoginRequest,
    LumpSumPriceUpdate, Opportunity, Record, Result, SalesDeskError, SolutionLine, Stage,
    StageUpdate,
};
use tracing::{info, instrument, warn};

use crate::activity::{ActivityFormatter, ActivityRow};
use crate::pricing::{plan_price_updates, run_bulk_update, BulkProgress, BulkUpdateReport};
use crate::sales_ports::SalesApi;
use crate::search::{search_options, SearchField};
use crate::session::{Session, SessionStore};
use crate::totals::{merge_totals, OpportunityTotal};
use crate::visibility::VisibilityPolicy;

const NAMES_UNAVAILABLE: &str =
    "Could not load sales user list. Please check the backend connection.";

/// Sales desk service
pub struct SalesDeskService {
    api: Arc<dyn SalesApi>,
    policy: VisibilityPolicy,
    activity: ActivityFormatter,
    session: SessionStore,
}

impl SalesDeskService {
    /// Create a new service with the default super users and timezone
    pub fn new(api: Arc<dyn SalesApi>) -> Self {
        Self {
            api,
            policy: VisibilityPolicy::default(),
            activity: ActivityFormatter::default(),
            session: SessionStore::new(),
        }
    }

    pub fn with_policy(mut self, policy: VisibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_activity_formatter(mut self, formatter: ActivityFormatter) -> Self {
        self.activity = formatter;
        self
    }

    pub fn session(&self) -> Session {
        self.session.current()
    }

    /// Group info of the logged-in user.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Session` when there is no usable session.
    pub fn current_group(&self) -> Result<GroupInfo> {
        self.session.require_group()
    }

    pub const fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    // === Login gate ===

    /// Sorted names offered on the login screen.
    ///
    /// # Errors
    /// Returns `SalesDeskError::NotFound` when the list is empty or cannot
    /// be fetched.
    pub async fn sales_names(&self) -> Result<Vec<String>> {
        let mut names = match self.api.sales_names().await {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "failed to load sales names");
                Vec::new()
            }
        };
        if names.is_empty() {
            return Err(SalesDeskError::NotFound(NAMES_UNAVAILABLE.to_string()));
        }
        names.sort();
        Ok(names)
    }

    /// Validate credentials with the backend and open a session.
    ///
    /// # Errors
    /// `InvalidInput` for a blank password, `Auth` when the backend rejects
    /// the credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, name: Option<&str>, password: &str) -> Result<GroupInfo> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        if password.is_empty() {
            return Err(SalesDeskError::InvalidInput(
                "Please select your name and enter your password.".to_string(),
            ));
        }

        let request =
            LoginRequest { name: name.map(str::to_string), password: password.to_string() };
        let response = self.api.validate_password(&request).await;
        if !response.is_success() {
            let message = response.message_or("Incorrect credentials or server error.");
            warn!(status = response.status, "login rejected");
            return Err(SalesDeskError::Auth(message));
        }

        let mut info = response.data.unwrap_or_default();
        if info.sales_name.is_none() {
            info.sales_name = name.map(str::to_string);
        }
        info!(sales_group = %info.sales_group, sales_name = info.display_name(), "logged in");
        self.session.login(info.clone());
        Ok(info)
    }

    /// Close the session and forget cached responses.
    pub fn logout(&self) {
        self.session.logout();
        self.api.clear_cache();
        info!("logged out");
    }

    /// Change the password of the logged-in user. Success ends the session.
    ///
    /// # Errors
    /// `InvalidInput` when either field is blank, `Backend` when rejected.
    #[instrument(skip_all)]
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<String> {
        let Session::LoggedIn(info) = self.session.current() else {
            return Err(SalesDeskError::Session(
                salesdesk_domain::constants::INVALID_SESSION_MESSAGE.to_string(),
            ));
        };
        if old_password.is_empty() || new_password.is_empty() {
            return Err(SalesDeskError::InvalidInput(
                "Please fill in both password fields.".to_string(),
            ));
        }

        let request = ChangePasswordRequest {
            name: info.display_name().to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let response = self.api.change_password(&request).await;
        if !response.is_success() {
            return Err(SalesDeskError::Backend {
                status: response.status,
                message: response.message_or("Failed to change password."),
            });
        }

        self.logout();
        Ok(response.message_or("Password changed. Please log in again."))
    }

    // === Views ===

    /// Every solution row visible to the user (`leads`).
    pub async fn opportunities(&self) -> Result<Vec<Record>> {
        let info = self.current_group()?;
        Ok(self.visible_dataset(Dataset::Leads, &info).await)
    }

    /// Opportunities joined with their solution-line totals.
    pub async fn opportunity_totals(&self) -> Result<Vec<OpportunityTotal>> {
        let info = self.current_group()?;
        let opportunities = self.visible_dataset(Dataset::Opportunities, &info).await;
        let lines = self.visible_dataset(Dataset::Leads, &info).await;
        Ok(merge_totals(&opportunities, &lines))
    }

    /// Values offered for `field`, drawn from the visible rows.
    pub async fn search_options(&self, field: SearchField) -> Result<Vec<String>> {
        Ok(search_options(&self.opportunities().await?, field))
    }

    /// Backend search, narrowed to what the user may see.
    ///
    /// # Errors
    /// `InvalidInput` for a blank term, `Backend` for non-200 responses.
    #[instrument(skip(self))]
    pub async fn search(&self, field: SearchField, term: &str) -> Result<Vec<Record>> {
        let info = self.current_group()?;
        if term.trim().is_empty() {
            return Err(SalesDeskError::InvalidInput("Please select a search term.".to_string()));
        }

        let response = self.api.search(field.column(), term, Some(&info.sales_group)).await;
        let rows = response.into_result("Failed to search.")?.unwrap_or_default();
        Ok(self.policy.filter_for_user(rows, info.display_name()))
    }

    /// Opportunities the user may edit (`leadBySales`), one per id.
    pub async fn editable_opportunities(&self) -> Result<Vec<Opportunity>> {
        let info = self.current_group()?;
        let rows = self.visible_dataset(Dataset::LeadsBySales, &info).await;
        let mut seen = HashSet::new();
        Ok(rows
            .iter()
            .filter_map(|row| match Opportunity::try_from(row) {
                Ok(opportunity) => Some(opportunity),
                Err(err) => {
                    warn!(error = %err, "skipping malformed opportunity row");
                    None
                }
            })
            .filter(|opportunity| seen.insert(opportunity.opportunity_id.text()))
            .collect())
    }

    /// Update stage and notes. Notes default to the current ones.
    ///
    /// # Errors
    /// `NotFound` when the opportunity is not editable by the user,
    /// `Backend` when the update is rejected.
    #[instrument(skip(self, notes))]
    pub async fn update_stage(
        &self,
        opportunity_id: &str,
        stage: Stage,
        notes: Option<String>,
    ) -> Result<String> {
        let opportunity = self.find_editable(opportunity_id).await?;
        let update = StageUpdate {
            opportunity_id: opportunity.opportunity_id,
            sales_notes: notes.unwrap_or(opportunity.sales_notes),
            stage,
        };
        let response = self.api.update_by_sales(&update).await;
        self.finish_mutation(response.status, response.message.as_deref(), "Failed to update.")
    }

    /// Solution lines of one opportunity visible to the user.
    ///
    /// # Errors
    /// `Backend` when the lookup is rejected.
    pub async fn solution_lines(&self, opportunity_id: &str) -> Result<Vec<SolutionLine>> {
        let info = self.current_group()?;
        let response =
            self.api.search("opportunity_id", opportunity_id.trim(), Some(&info.sales_group)).await;
        let rows = response.into_result("Failed to load solution details.")?.unwrap_or_default();
        Ok(self
            .policy
            .filter_for_user(rows, info.display_name())
            .iter()
            .filter_map(|row| SolutionLine::try_from(row).ok())
            .collect())
    }

    /// Post new prices for every line of an opportunity.
    ///
    /// Lines absent from `overrides` are re-posted with their current price.
    ///
    /// # Errors
    /// `NotFound` when the opportunity has no visible lines, `InvalidInput`
    /// for overrides naming unknown lines.
    pub async fn update_prices(
        &self,
        opportunity_id: &str,
        overrides: &[(String, u64)],
        progress: &mut (dyn FnMut(BulkProgress<'_>) + Send),
    ) -> Result<BulkUpdateReport> {
        let lines = self.solution_lines(opportunity_id).await?;
        if lines.is_empty() {
            return Err(SalesDeskError::NotFound(
                "No solution details found for this opportunity.".to_string(),
            ));
        }
        let updates = plan_price_updates(&lines, overrides)?;
        let report = run_bulk_update(self.api.as_ref(), &updates, progress).await;
        self.api.clear_cache();
        Ok(report)
    }

    /// Replace an opportunity's price with a single lump sum.
    ///
    /// # Errors
    /// `NotFound` when the opportunity is not editable by the user,
    /// `Backend` when the update is rejected.
    #[instrument(skip(self))]
    pub async fn update_lump_sum(
        &self,
        opportunity_id: &str,
        selling_price: u64,
    ) -> Result<String> {
        let info = self.current_group()?;
        let opportunity = self.find_editable(opportunity_id).await?;
        let update = LumpSumPriceUpdate {
            opportunity_id: opportunity.opportunity_id,
            selling_price,
            user: info.display_name().to_string(),
        };
        let response = self.api.update_lump_sum_price(&update).await;
        let message = response.message.as_deref();
        self.finish_mutation(response.status, message, "Failed to update price.")
    }

    /// Group activity log with timestamps in the display timezone.
    pub async fn activity_log(&self) -> Result<Vec<ActivityRow>> {
        let info = self.current_group()?;
        let rows = self.fetch_or_empty(Dataset::ActivityLog, &info.sales_group).await;
        let entries: Vec<ActivityLogEntry> = rows
            .into_iter()
            .filter_map(|row| {
                serde_json::from_value(serde_json::Value::Object(row.into_map())).ok()
            })
            .collect();
        Ok(self.activity.rows(entries))
    }

    /// Raw reference list for the group.
    ///
    /// # Errors
    /// `InvalidInput` for datasets that are not reference lists.
    pub async fn lookup(&self, dataset: Dataset) -> Result<Vec<Record>> {
        if !dataset.is_lookup() {
            return Err(SalesDeskError::InvalidInput(format!("{dataset} is not a lookup list")));
        }
        let info = self.current_group()?;
        Ok(self.fetch_or_empty(dataset, &info.sales_group).await)
    }

    /// Forget cached responses so the next read hits the backend.
    pub fn refresh(&self) {
        self.api.clear_cache();
    }

    // === Helpers ===

    async fn fetch_or_empty(&self, dataset: Dataset, sales_group: &str) -> Vec<Record> {
        match self.api.fetch_dataset(dataset, sales_group).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(dataset = %dataset, error = %err, "dataset fetch failed");
                Vec::new()
            }
        }
    }

    async fn visible_dataset(&self, dataset: Dataset, info: &GroupInfo) -> Vec<Record> {
        let rows = self.fetch_or_empty(dataset, &info.sales_group).await;
        self.policy.filter_for_user(rows, info.display_name())
    }

    async fn find_editable(&self, opportunity_id: &str) -> Result<Opportunity> {
        let wanted = opportunity_id.trim();
        self.editable_opportunities()
            .await?
            .into_iter()
            .find(|opportunity| opportunity.opportunity_id == wanted)
            .ok_or_else(|| {
                SalesDeskError::NotFound(format!("Opportunity {wanted} is not available to you."))
            })
    }

    fn finish_mutation(
        &self,
        status: u16,
        message: Option<&str>,
        fallback: &str,
    ) -> Result<String> {
        let message = message.filter(|m| !m.is_empty());
        if status == salesdesk_domain::constants::STATUS_OK {
            self.api.clear_cache();
            Ok(message.unwrap_or("Update successful.").to_string())
        } else {
            Err(SalesDeskError::Backend {
                status,
                message: message.unwrap_or(fallback).to_string(),
            })
        }
    }
}
