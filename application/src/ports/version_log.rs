//! Audit trail port
//!
//! An append-only log of [`Version`] records keyed by discussion. The
//! domain decides what gets appended (see
//! [`TrackedFields`](agora_domain::TrackedFields)); the log only stores it.

use agora_domain::{DiscussionId, NewVersion, Version};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while reading or appending versions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VersionLogError {
    #[error("Audit trail unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait VersionLog: Send + Sync {
    /// Append a version; entries are never rewritten
    async fn append(&self, version: NewVersion) -> Result<Version, VersionLogError>;

    /// Versions recorded for a discussion, oldest first
    async fn versions_for(&self, discussion_id: DiscussionId)
    -> Result<Vec<Version>, VersionLogError>;
}
