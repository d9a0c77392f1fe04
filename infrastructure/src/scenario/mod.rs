//! Scenario files: a TOML description of users, groups and a sequence of
//! discussion activity, replayed against in-memory adapters.
//!
//! ```toml
//! start = "2024-03-01T09:00:00Z"
//!
//! [[users]]
//! key = "ada"
//! name = "Ada"
//! email = "ada@example.org"
//!
//! [[groups]]
//! key = "council"
//! name = "Council"
//! privacy = "public_or_private"
//! members = ["ada"]
//!
//! [[steps]]
//! action = "discuss"
//! key = "budget"
//! group = "council"
//! author = "ada"
//! title = "Budget 2024"
//! ```
//!
//! `advance` and `closes_in_minutes` accept negative minutes. Moving the clock
//! back does not reorder the audit trail: a discussion's last-versioned time
//! is always that of its last appended version.

mod file;
mod runner;

pub use file::{GroupSpec, Scenario, ScenarioError, Step, UserSpec};
pub use runner::{ScenarioOutcome, ScenarioRunner};
