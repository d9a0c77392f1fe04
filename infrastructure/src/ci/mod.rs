//! CI adapters: running external test-suite commands.

mod process_runner;

pub use process_runner::ProcessSuiteRunner;
