pub mod aggregate;
pub mod config;
pub mod error;
pub mod expander;
pub mod generator;
pub mod logging;
pub mod organisms;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use aggregate::{Aggregates, ClientInvocation};
pub use config::Config;
pub use error::{FillError, Result};
pub use expander::expand;
pub use generator::{Options, Plan, Report, generate, plan, run, write_plan};
pub use organisms::{INCREMENT_STEP, ORGANISMS, increment_for};
