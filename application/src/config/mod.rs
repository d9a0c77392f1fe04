//! Application-level configuration.
//!
//! - [`CiConfig`]: which test suites a CI run executes and their environment

pub mod ci;

pub use ci::{CiConfig, TestSuite};
