//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod activity_log;
pub mod clock;
pub mod persistence;
pub mod progress;
pub mod suite_runner;
pub mod version_log;
