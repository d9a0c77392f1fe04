//! Audit trail configuration from TOML (`[versioning]` section)

use agora_domain::TrackedFields;
use agora_domain::discussion::fields;
use serde::{Deserialize, Serialize};

/// Raw versioning configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVersioningConfig {
    /// Discussion fields whose changes create a version
    pub tracked_fields: Vec<String>,
}

impl Default for FileVersioningConfig {
    fn default() -> Self {
        Self {
            tracked_fields: TrackedFields::default()
                .iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl FileVersioningConfig {
    pub fn to_tracked_fields(&self) -> TrackedFields {
        TrackedFields::new(self.tracked_fields.iter().cloned())
    }

    /// Configured names that are not discussion fields
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.tracked_fields
            .iter()
            .map(String::as_str)
            .filter(|f| !fields::ALL.contains(f))
            .collect()
    }
}
