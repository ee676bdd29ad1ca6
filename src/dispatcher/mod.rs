#[allow(clippy::module_inception)]
mod dispatcher;
mod error;
mod task;
mod types;

pub use dispatcher::{run_stress_test, run_with, Dispatcher};
pub use error::{StressError, StressResult};
pub use types::StressConfig;
