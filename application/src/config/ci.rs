//! CI run parameters.
//!
//! [`CiConfig`] lists the external test suites a CI run executes, in order,
//! and the environment applied to each of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable pointing test suites at a display server
pub const DISPLAY_VAR: &str = "DISPLAY";

/// Display used when none is configured
pub const DEFAULT_DISPLAY: &str = ":99";

/// One external test-suite command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Short name shown in progress and errors (e.g., "spec")
    pub name: String,
    /// Shell command line to run
    pub command: String,
}

impl TestSuite {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// Suites to run and the environment they run in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiConfig {
    /// Suites, run sequentially in this order
    pub suites: Vec<TestSuite>,
    /// Extra environment variables for every suite
    pub env: BTreeMap<String, String>,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            suites: vec![
                TestSuite::new("spec", "bundle exec rspec"),
                TestSuite::new("features", "bundle exec cucumber"),
            ],
            env: BTreeMap::from([(DISPLAY_VAR.to_string(), DEFAULT_DISPLAY.to_string())]),
        }
    }
}

impl CiConfig {
    // ==================== Builder Methods ====================

    pub fn with_suites(mut self, suites: Vec<TestSuite>) -> Self {
        self.suites = suites;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn display(&self) -> Option<&str> {
        self.env.get(DISPLAY_VAR).map(String::as_str)
    }
}
