//! Per-user read, follow and view state for a discussion

use crate::comment::Comment;
use crate::core::ids::{DiscussionId, ReaderId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reader record exists per (discussion, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionReader {
    pub id: ReaderId,
    pub discussion_id: DiscussionId,
    pub user_id: UserId,
    /// Explicit follow choice; `None` defers to the membership default
    pub following: Option<bool>,
    pub read_comments_count: u32,
    pub last_read_at: Option<DateTime<Utc>>,
    pub view_count: u32,
}

impl DiscussionReader {
    pub fn new(id: ReaderId, discussion_id: DiscussionId, user_id: UserId) -> Self {
        Self {
            id,
            discussion_id,
            user_id,
            following: None,
            read_comments_count: 0,
            last_read_at: None,
            view_count: 0,
        }
    }

    pub fn follow(&mut self) {
        self.following = Some(true);
    }

    pub fn unfollow(&mut self) {
        self.following = Some(false);
    }

    /// Record a view at `now` having seen `comments_count` comments.
    pub fn viewed(&mut self, now: DateTime<Utc>, comments_count: u32) {
        self.view_count += 1;
        self.last_read_at = Some(now);
        self.read_comments_count = comments_count;
    }

    /// Recount comments read, i.e. created at or before `last_read_at`.
    pub fn reset_counts(&mut self, comments: &[Comment]) {
        self.read_comments_count = match self.last_read_at {
            None => 0,
            Some(last_read_at) => comments
                .iter()
                .filter(|c| c.created_at <= last_read_at)
                .count() as u32,
        };
    }
}
