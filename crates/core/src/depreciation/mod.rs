//! Fixed asset depreciation.
//!
//! Straight-line schedule generation and the grouping of pending schedules
//! into one consolidated journal per account pair.

pub mod aggregation;
pub mod error;
pub mod schedule;
pub mod types;

#[cfg(test)]
mod aggregation_props;

pub use aggregation::group_by_account_pair;
pub use error::DepreciationError;
pub use schedule::{end_of_month, straight_line_schedule, validate_terms};
pub use types::{
    AccountPair, AssetTerms, DepreciationRunSummary, PendingSchedule, PlannedDepreciation,
    PostingGroup, ScheduleStatus,
};
