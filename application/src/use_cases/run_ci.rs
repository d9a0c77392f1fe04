//! Run CI use case.
//!
//! Runs the configured test suites one after another. The first suite that
//! exits non-zero stops the run; later suites never start.

use crate::config::{CiConfig, TestSuite};
use crate::ports::progress::CiProgressNotifier;
use crate::ports::suite_runner::{SuiteOutcome, SuiteRunner, SuiteRunnerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that end a CI run
#[derive(Error, Debug)]
pub enum RunCiError {
    #[error("No test suites configured")]
    NoSuites,

    #[error("Suite `{suite}` failed with {}", describe_exit(*exit_code))]
    SuiteFailed {
        suite: String,
        exit_code: Option<i32>,
    },

    #[error(transparent)]
    Runner(#[from] SuiteRunnerError),
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Outcome of every suite of a successful run, in run order
#[derive(Debug, Clone, Default)]
pub struct CiReport {
    pub results: Vec<(TestSuite, SuiteOutcome)>,
}

impl CiReport {
    pub fn total_duration(&self) -> std::time::Duration {
        self.results.iter().map(|(_, o)| o.duration).sum()
    }
}

/// Use case for running the CI suites.
#[derive(Clone)]
pub struct RunCiUseCase {
    runner: Arc<dyn SuiteRunner>,
}

impl RunCiUseCase {
    pub fn new(runner: Arc<dyn SuiteRunner>) -> Self {
        Self { runner }
    }

    /// Run every suite in `config` in order.
    pub async fn execute(
        &self,
        config: &CiConfig,
        progress: &dyn CiProgressNotifier,
    ) -> Result<CiReport, RunCiError> {
        if config.suites.is_empty() {
            return Err(RunCiError::NoSuites);
        }

        progress.on_run_start(config.suites.len());
        let mut report = CiReport::default();

        for (index, suite) in config.suites.iter().enumerate() {
            info!("Running suite `{}`: {}", suite.name, suite.command);
            progress.on_suite_start(suite, index);

            let outcome = match self.runner.run(suite, &config.env).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    progress.on_run_complete(false);
                    return Err(e.into());
                }
            };
            progress.on_suite_complete(suite, &outcome);

            if !outcome.success() {
                error!(
                    "Suite `{}` failed with {}",
                    suite.name,
                    describe_exit(outcome.exit_code)
                );
                progress.on_run_complete(false);
                return Err(RunCiError::SuiteFailed {
                    suite: suite.name.clone(),
                    exit_code: outcome.exit_code,
                });
            }
            report.results.push((suite.clone(), outcome));
        }

        progress.on_run_complete(true);
        info!("All {} suite(s) passed", report.results.len());
        Ok(report)
    }
}
