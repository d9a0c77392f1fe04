//! Infrastructure layer for agora
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: in-memory storage and audit trail, clocks, the JSONL
//! activity log, the shell suite runner, configuration file loading and
//! scenario replay.

pub mod audit;
pub mod ci;
pub mod clock;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod scenario;

// Re-export commonly used types
pub use audit::InMemoryVersionLog;
pub use ci::ProcessSuiteRunner;
pub use clock::{ManualClock, SystemClock};
pub use config::{
    ConfigIssue, ConfigLoader, FileCiConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileVersioningConfig, Severity,
};
pub use logging::JsonlActivityLogger;
pub use persistence::InMemoryStore;
pub use scenario::{Scenario, ScenarioError, ScenarioOutcome, ScenarioRunner, Step};
