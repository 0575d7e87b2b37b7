//! Common data types used throughout the application

pub mod account;
pub mod activity;
pub mod dataset;
pub mod envelope;
pub mod opportunity;
pub mod record;
pub mod row_id;

pub use account::{
    ChangePasswordRequest, GroupInfo, LoginRequest, LumpSumPriceUpdate, SalesUser,
    SolutionPriceUpdate, StageUpdate,
};
pub use activity::ActivityLogEntry;
pub use dataset::Dataset;
pub use envelope::Envelope;
pub use opportunity::{Opportunity, SolutionLine, Stage};
pub use record::Record;
pub use row_id::RowId;
