//! Execution report
//!
//! Lock-free outcome counters shared by every request task, plus the
//! start/end timestamps of a run.

#[allow(clippy::module_inception)]
mod report;
mod types;

pub use report::Report;
pub use types::{Outcome, ReportSnapshot};
