//! # Checks & runner
//!
//! Assertions evaluated against HTTP responses, scenarios that bundle a
//! request with its assertions and captures, and a serial suite runner with
//! a summary report.

pub mod assertion;
pub mod runner;
pub mod scenario;

pub use assertion::{Assertion, AssertionResult};
pub use runner::{run_scenario, Filter, RunReport, ScenarioOutcome, Suite};
pub use scenario::{Capture, Scenario, Severity, Tag};
