//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain/application types where
//! appropriate.

mod ci;
mod logging;
mod output;
mod versioning;

pub use ci::FileCiConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use versioning::FileVersioningConfig;

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key (e.g., "ci.suites[0].command")
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Audit trail settings
    pub versioning: FileVersioningConfig,
    /// CI suites and environment
    pub ci: FileCiConfig,
    /// Activity and diagnostic log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Tracked fields: empty list (warning), unknown names (warning)
    /// 2. CI suites: none configured, blank names or commands (errors)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Versioning
        if self.versioning.tracked_fields.is_empty() {
            issues.push(ConfigIssue::warning(
                "versioning.tracked_fields",
                "no fields tracked; discussion edits will never be versioned",
            ));
        }
        for unknown in self.versioning.unknown_fields() {
            issues.push(ConfigIssue::warning(
                "versioning.tracked_fields",
                format!("'{}' is not a discussion field and will be ignored", unknown),
            ));
        }

        // 2. CI suites
        if self.ci.suites.is_empty() {
            issues.push(ConfigIssue::error("ci.suites", "no test suites configured"));
        }
        for (i, suite) in self.ci.suites.iter().enumerate() {
            if suite.name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    format!("ci.suites[{}].name", i),
                    "suite name must not be empty",
                ));
            }
            if suite.command.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    format!("ci.suites[{}].command", i),
                    "suite command must not be empty",
                ));
            }
        }

        issues
    }

    /// Whether any issue is fatal
    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[versioning]
tracked_fields = ["title", "description", "private"]

[[ci.suites]]
name = "spec"
command = "bundle exec rspec"

[logging]
activity_log = "log/activity.jsonl"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.versioning.to_tracked_fields().contains("private"));
        assert_eq!(config.ci.suites.len(), 1);
        assert_eq!(
            config.logging.activity_log.as_deref(),
            Some(std::path::Path::new("log/activity.jsonl"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.ci.suites.len(), 2);
        assert!(config.logging.activity_log.is_none());
        assert!(config.versioning.to_tracked_fields().contains("description"));
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(!config.has_errors());
    }

    #[test]
    fn test_validate_blank_suite_command() {
        let toml_str = r#"
[[ci.suites]]
name = "spec"
command = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "ci.suites[0].command");
        assert!(config.has_errors());
    }

    #[test]
    fn test_validate_untracked_versioning_warns() {
        let toml_str = r#"
[versioning]
tracked_fields = []
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!config.has_errors());
    }
}
