//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for discussion reports
///
/// Shared by the config file (`[output] format`) and the CLI `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every section of every discussion summary
    Full,
    /// One line per discussion (default)
    Brief,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Brief
    }
}
