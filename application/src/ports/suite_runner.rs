//! Suite runner port
//!
//! Runs one external test-suite command to completion and reports how it
//! exited. Implementations live in the infrastructure layer.

use crate::config::TestSuite;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that prevent a suite from running at all
#[derive(Error, Debug)]
pub enum SuiteRunnerError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// How a suite process exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOutcome {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

impl SuiteOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[async_trait]
pub trait SuiteRunner: Send + Sync {
    /// Run `suite` with `env` added to the inherited environment, blocking
    /// until the process exits.
    async fn run(
        &self,
        suite: &TestSuite,
        env: &BTreeMap<String, String>,
    ) -> Result<SuiteOutcome, SuiteRunnerError>;
}
