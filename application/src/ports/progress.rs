//! Progress notification port
//!
//! Defines the interface for reporting progress during a CI run.

use crate::config::TestSuite;
use crate::ports::suite_runner::SuiteOutcome;

/// Callback for progress updates during a CI run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, ...).
pub trait CiProgressNotifier: Send + Sync {
    /// Called once before the first suite starts
    fn on_run_start(&self, total_suites: usize);

    /// Called when a suite starts (`index` is zero-based)
    fn on_suite_start(&self, suite: &TestSuite, index: usize);

    /// Called when a suite process exits
    fn on_suite_complete(&self, suite: &TestSuite, outcome: &SuiteOutcome);

    /// Called when the run ends, successfully or not
    fn on_run_complete(&self, _passed: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoCiProgress;

impl CiProgressNotifier for NoCiProgress {
    fn on_run_start(&self, _total_suites: usize) {}
    fn on_suite_start(&self, _suite: &TestSuite, _index: usize) {}
    fn on_suite_complete(&self, _suite: &TestSuite, _outcome: &SuiteOutcome) {}
}
