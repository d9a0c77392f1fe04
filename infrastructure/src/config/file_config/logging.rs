//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving activity events; disabled when unset
    pub activity_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs; stderr only when unset
    pub dir: Option<PathBuf>,
}
