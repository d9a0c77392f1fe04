//! Progress reporting for CI runs

use agora_application::config::TestSuite;
use agora_application::ports::progress::CiProgressNotifier;
use agora_application::ports::suite_runner::SuiteOutcome;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports CI progress with a suite counter bar.
///
/// Suite starts are printed above the bar; suites themselves write straight
/// to the terminal.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CiProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_suites: usize) {
        let bar = ProgressBar::new(total_suites as u64);
        bar.set_style(Self::style());
        bar.set_prefix("CI");
        bar.set_message("starting");
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_suite_start(&self, suite: &TestSuite, _index: usize) {
        self.with_bar(|bar| {
            bar.println(format!("{} {} ({})", "->".cyan(), suite.name.bold(), suite.command));
            bar.set_message(suite.name.clone());
        });
    }

    fn on_suite_complete(&self, suite: &TestSuite, outcome: &SuiteOutcome) {
        self.with_bar(|bar| {
            let status = if outcome.success() {
                format!("{} {}", "v".green(), suite.name)
            } else {
                format!("{} {}", "x".red(), suite.name)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_run_complete(&self, passed: bool) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = guard.take() {
            if passed {
                bar.finish_with_message(format!("{}", "all suites passed".green()));
            } else {
                bar.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl CiProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_suites: usize) {
        println!("{} {} suite(s)", "->".cyan(), total_suites);
    }

    fn on_suite_start(&self, suite: &TestSuite, index: usize) {
        println!(
            "{} [{}] {} ({})",
            "->".cyan(),
            index + 1,
            suite.name.bold(),
            suite.command
        );
    }

    fn on_suite_complete(&self, suite: &TestSuite, outcome: &SuiteOutcome) {
        if outcome.success() {
            println!("  {} {}", "v".green(), suite.name);
        } else {
            println!("  {} {} (failed)", "x".red(), suite.name);
        }
    }
}
