//! Audit trail records for discussions.
//!
//! The trail itself is an append-only log kept outside the domain. The
//! domain decides *which* field changes are worth a version through
//! [`TrackedFields`], and how the latest version timestamp is derived.

use crate::core::ids::{DiscussionId, UserId, VersionId};
use crate::discussion::{Discussion, fields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of change recorded in a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionEvent {
    Update,
}

/// One entry of the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub discussion_id: DiscussionId,
    pub event: VersionEvent,
    pub changed_fields: BTreeSet<String>,
    /// Who made the change, when known
    pub whodunnit: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A version waiting to be appended to the trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVersion {
    pub discussion_id: DiscussionId,
    pub event: VersionEvent,
    pub changed_fields: BTreeSet<String>,
    pub whodunnit: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl NewVersion {
    pub fn into_version(self, id: VersionId) -> Version {
        Version {
            id,
            discussion_id: self.discussion_id,
            event: self.event,
            changed_fields: self.changed_fields,
            whodunnit: self.whodunnit,
            created_at: self.created_at,
        }
    }
}

/// Allow-list of discussion fields whose changes produce a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFields {
    fields: BTreeSet<String>,
}

impl TrackedFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// The tracked subset of `changed`.
    pub fn relevant<'a, I>(&self, changed: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        changed
            .into_iter()
            .filter(|f| self.contains(f))
            .map(str::to_string)
            .collect()
    }

    /// Build the version for an update, or `None` when nothing tracked changed.
    pub fn version_for_update<'a, I>(
        &self,
        discussion_id: DiscussionId,
        changed: I,
        whodunnit: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Option<NewVersion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let changed_fields = self.relevant(changed);
        if changed_fields.is_empty() {
            return None;
        }
        Some(NewVersion {
            discussion_id,
            event: VersionEvent::Update,
            changed_fields,
            whodunnit,
            created_at: now,
        })
    }
}

impl Default for TrackedFields {
    fn default() -> Self {
        Self::new([fields::TITLE, fields::DESCRIPTION])
    }
}

/// `created_at` of the last appended version, or of the discussion itself
/// when it has never been versioned.
///
/// `versions` is in append order. The last entry wins even when its
/// timestamp is earlier than a previous one.
pub fn last_versioned_at(discussion: &Discussion, versions: &[Version]) -> DateTime<Utc> {
    versions
        .last()
        .map_or(discussion.created_at, |v| v.created_at)
}
