//! swipekit Headless Diagnostics
//!
//! Drives a swipeable cell through a JSON scenario without any UI and
//! reports what happened: the final state and offset, every state change,
//! and the first failed assertion if any.
//!
//! # Example
//!
//! ```rust
//! use swipekit_app::run_scenario;
//!
//! let outcome = run_scenario(r#"{
//!     "steps": [
//!         {"type": "begin"},
//!         {"type": "drag", "dx": -30},
//!         {"type": "drag", "dx": -30},
//!         {"type": "release"},
//!         {"type": "wait", "ms": 400},
//!         {"type": "assert_state", "state": "open"},
//!         {"type": "assert_offset", "value": -90}
//!     ]
//! }"#).unwrap();
//!
//! assert!(!outcome.is_failed());
//! ```

pub mod headless_host;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;

#[cfg(test)]
mod tests;

pub use headless_host::HeadlessHost;
pub use headless_report::{HeadlessReport, ReportStatus, TransitionRecord};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome, ScenarioRunner};
pub use headless_runtime::{HeadlessFrame, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, PanelSpec, ScenarioStep};
