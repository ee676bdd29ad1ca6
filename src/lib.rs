//! fullcycle_stress - a small concurrent HTTP load generator
//!
//! Sends a fixed number of GET requests to one URL through a bounded
//! admission gate and tallies the outcomes by status class.

pub mod cli;
pub mod dispatcher;
pub mod report;
pub mod telemetry;

pub use dispatcher::{run_stress_test, Dispatcher, StressConfig, StressError, StressResult};
pub use report::{Outcome, Report, ReportSnapshot};
