//! Group entity and its discussion privacy setting

use crate::core::ids::GroupId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which privacy values a group allows on its discussions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyOptions {
    /// Every discussion is private
    PrivateOnly,
    /// Authors choose per discussion
    #[default]
    PublicOrPrivate,
    /// Every discussion is public
    PublicOnly,
}

impl PrivacyOptions {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyOptions::PrivateOnly => "private_only",
            PrivacyOptions::PublicOrPrivate => "public_or_private",
            PrivacyOptions::PublicOnly => "public_only",
        }
    }

    /// Privacy value forced onto a new discussion, if the option forces one.
    pub fn forced_privacy(&self) -> Option<bool> {
        match self {
            PrivacyOptions::PrivateOnly => Some(true),
            PrivacyOptions::PublicOnly => Some(false),
            PrivacyOptions::PublicOrPrivate => None,
        }
    }
}

impl std::fmt::Display for PrivacyOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PrivacyOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private_only" | "private" => Ok(PrivacyOptions::PrivateOnly),
            "public_or_private" | "either" => Ok(PrivacyOptions::PublicOrPrivate),
            "public_only" | "public" => Ok(PrivacyOptions::PublicOnly),
            _ => Err(format!("Invalid discussion privacy option: {}", s)),
        }
    }
}

/// A group of members that owns discussions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub discussion_privacy_options: PrivacyOptions,
    pub created_at: DateTime<Utc>,
}

/// Attributes for a group that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub discussion_privacy_options: PrivacyOptions,
}

impl NewGroup {
    pub fn new(name: impl Into<String>, discussion_privacy_options: PrivacyOptions) -> Self {
        Self {
            name: name.into(),
            discussion_privacy_options,
        }
    }

    pub fn into_group(self, id: GroupId, created_at: DateTime<Utc>) -> Group {
        Group {
            id,
            name: self.name,
            discussion_privacy_options: self.discussion_privacy_options,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_privacy() {
        assert_eq!(PrivacyOptions::PrivateOnly.forced_privacy(), Some(true));
        assert_eq!(PrivacyOptions::PublicOnly.forced_privacy(), Some(false));
        assert_eq!(PrivacyOptions::PublicOrPrivate.forced_privacy(), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "private_only".parse::<PrivacyOptions>().unwrap(),
            PrivacyOptions::PrivateOnly
        );
        assert_eq!(
            "Public".parse::<PrivacyOptions>().unwrap(),
            PrivacyOptions::PublicOnly
        );
        assert!("secret".parse::<PrivacyOptions>().is_err());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&PrivacyOptions::PublicOrPrivate).unwrap();
        assert_eq!(json, "\"public_or_private\"");
    }
}
