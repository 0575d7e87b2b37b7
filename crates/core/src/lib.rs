//! # SalesDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Row visibility, column layout and totals
//! - The [`SalesApi`] port implemented by the infra crate
//! - [`SalesDeskService`], one method per dashboard view
//!
//! ## Architecture Principles
//! - Only depends on `salesdesk-domain`
//! - No HTTP, caching or terminal code
//! - All external dependencies via traits

pub mod activity;
pub mod pricing;
pub mod search;
pub mod service;
pub mod session;
pub mod table;
pub mod totals;
pub mod visibility;

// Infrastructure ports
pub mod sales_ports;

pub use activity::{ActivityFormatter, ActivityRow};
pub use pricing::{BulkProgress, BulkUpdateReport};
pub use sales_ports::SalesApi;
pub use search::SearchField;
pub use service::SalesDeskService;
pub use session::{Session, SessionStore};
pub use table::{clean_for_display, Cell, Table};
pub use totals::OpportunityTotal;
pub use visibility::VisibilityPolicy;
