//! Scenario file format.

use agora_application::ServiceError;
use agora_domain::{Position, PrivacyOptions};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate {kind} key `{key}`")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("Unknown {kind} `{key}`")]
    UnknownKey { kind: &'static str, key: String },

    #[error("Step {index} moves the clock out of range")]
    TimeOutOfRange { index: usize },

    #[error("Scenario setup failed: {0}")]
    Setup(#[source] ServiceError),

    #[error("Step {index} ({action}) failed: {source}")]
    Step {
        index: usize,
        action: &'static str,
        #[source]
        source: ServiceError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSpec {
    pub key: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub privacy: PrivacyOptions,
    #[serde(default)]
    pub members: Vec<String>,
    /// Members who follow every discussion of the group unless they opt out
    #[serde(default)]
    pub follow_by_default: Vec<String>,
}

/// One replayed action. Keys refer to users, groups, discussions, comments
/// and motions declared earlier in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Discuss {
        key: String,
        group: Option<String>,
        author: String,
        title: String,
        #[serde(default)]
        description: String,
        private: Option<bool>,
    },
    Update {
        discussion: String,
        actor: Option<String>,
        title: Option<String>,
        description: Option<String>,
        private: Option<bool>,
        author: Option<String>,
    },
    Archive {
        discussion: String,
    },
    View {
        discussion: String,
        user: Option<String>,
    },
    Follow {
        discussion: String,
        user: String,
    },
    Unfollow {
        discussion: String,
        user: String,
    },
    Comment {
        key: Option<String>,
        discussion: String,
        author: String,
        body: String,
    },
    DeleteComment {
        comment: String,
    },
    Motion {
        key: String,
        discussion: String,
        author: String,
        name: String,
        #[serde(default)]
        description: String,
        /// Negative values create a motion that is already closed
        closes_in_minutes: Option<i64>,
    },
    CloseMotion {
        motion: String,
    },
    DestroyMotion {
        motion: String,
    },
    Vote {
        motion: String,
        user: String,
        position: Position,
        statement: Option<String>,
    },
    Join {
        group: String,
        user: String,
    },
    Leave {
        group: String,
        user: String,
    },
    /// Move the clock; negative values move it back
    Advance {
        minutes: i64,
    },
    Destroy {
        discussion: String,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Discuss { .. } => "discuss",
            Step::Update { .. } => "update",
            Step::Archive { .. } => "archive",
            Step::View { .. } => "view",
            Step::Follow { .. } => "follow",
            Step::Unfollow { .. } => "unfollow",
            Step::Comment { .. } => "comment",
            Step::DeleteComment { .. } => "delete_comment",
            Step::Motion { .. } => "motion",
            Step::CloseMotion { .. } => "close_motion",
            Step::DestroyMotion { .. } => "destroy_motion",
            Step::Vote { .. } => "vote",
            Step::Join { .. } => "join",
            Step::Leave { .. } => "leave",
            Step::Advance { .. } => "advance",
            Step::Destroy { .. } => "destroy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Clock value before the first step
    #[serde(default = "default_start")]
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub users: Vec<UserSpec>,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_start() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Scenario {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario: Scenario = r#"
start = "2024-03-01T09:00:00Z"

[[users]]
key = "ada"
name = "Ada"
email = "ada@example.org"

[[groups]]
key = "council"
name = "Council"
privacy = "private_only"
members = ["ada"]

[[steps]]
action = "discuss"
key = "budget"
group = "council"
author = "ada"
title = "Budget"

[[steps]]
action = "vote"
motion = "m1"
user = "ada"
position = "block"

[[steps]]
action = "advance"
minutes = 30
"#
        .parse()
        .unwrap();

        assert_eq!(scenario.start.to_rfc3339(), "2024-03-01T09:00:00+00:00");
        assert_eq!(scenario.groups[0].privacy, PrivacyOptions::PrivateOnly);
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[0].action(), "discuss");
        assert!(matches!(
            scenario.steps[1],
            Step::Vote {
                position: Position::Block,
                ..
            }
        ));
        assert_eq!(scenario.steps[2], Step::Advance { minutes: 30 });
    }

    #[test]
    fn test_defaults() {
        let scenario: Scenario = "".parse().unwrap();
        assert_eq!(scenario.start.timestamp(), 0);
        assert!(scenario.steps.is_empty());
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = r#"
[[steps]]
action = "teleport"
"#
        .parse::<Scenario>();
        assert!(matches!(result, Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::from_file("/nonexistent/scenario.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scenario.toml"));
    }
}
