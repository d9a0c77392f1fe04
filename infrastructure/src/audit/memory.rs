//! Append-only in-memory version log.

use agora_application::ports::version_log::{VersionLog, VersionLogError};
use agora_domain::{DiscussionId, NewVersion, Version, VersionId};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Versions kept in append order; ids count up from 1.
#[derive(Default)]
pub struct InMemoryVersionLog {
    entries: RwLock<Vec<Version>>,
}

impl InMemoryVersionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of versions across all discussions
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl VersionLog for InMemoryVersionLog {
    async fn append(&self, version: NewVersion) -> Result<Version, VersionLogError> {
        let mut entries = self.entries.write().await;
        let version = version.into_version(VersionId::new(entries.len() as u64 + 1));
        entries.push(version.clone());
        Ok(version)
    }

    async fn versions_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Version>, VersionLogError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|v| v.discussion_id == discussion_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{UserId, VersionEvent};
    use chrono::{TimeZone, Utc};

    fn update(discussion: u64, field: &str, secs: i64) -> NewVersion {
        NewVersion {
            discussion_id: DiscussionId::new(discussion),
            event: VersionEvent::Update,
            changed_fields: [field.to_string()].into_iter().collect(),
            whodunnit: Some(UserId::new(1)),
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_versions_are_per_discussion_in_append_order() {
        let log = InMemoryVersionLog::new();
        log.append(update(1, "title", 0)).await.unwrap();
        log.append(update(2, "title", 1)).await.unwrap();
        log.append(update(1, "description", 2)).await.unwrap();

        let versions = log.versions_for(DiscussionId::new(1)).await.unwrap();
        assert_eq!(versions.len(), 2);
        assert!(versions[1].changed_fields.contains("description"));
        assert_eq!(log.len().await, 3);
    }

    #[tokio::test]
    async fn test_ids_follow_append_position() {
        let log = InMemoryVersionLog::new();
        let first = log.append(update(5, "title", 9)).await.unwrap();
        let second = log.append(update(5, "description", 0)).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        let versions = log.versions_for(DiscussionId::new(5)).await.unwrap();
        assert_eq!(versions.last(), Some(&second));
    }
}
