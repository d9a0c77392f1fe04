//! Report and CI output formatting

pub mod console;
pub mod formatter;
