//! Presentation layer for agora
//!
//! This crate contains CLI definitions, report formatters and CI
//! progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, ReportView};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
