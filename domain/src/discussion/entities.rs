//! Discussion aggregate root

use super::privacy::{inherit_privacy, privacy_is_permitted_by_group};
use crate::comment::{Comment, latest_comment_at};
use crate::core::ids::{DiscussionId, GroupId, UserId};
use crate::core::validation::ValidationErrors;
use crate::group::Group;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 150;

/// Field names as recorded in the audit trail
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PRIVATE: &str = "private";
    pub const AUTHOR: &str = "author";

    /// Every field a [`DiscussionChanges`](super::DiscussionChanges) can touch
    pub const ALL: [&str; 4] = [TITLE, DESCRIPTION, PRIVATE, AUTHOR];
}

/// A topic raised in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: DiscussionId,
    pub group_id: Option<GroupId>,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub private: Option<bool>,
    pub archived_at: Option<DateTime<Utc>>,
    pub total_views: u64,
    pub motions_count: u32,
    pub comments_count: u32,
    pub last_comment_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    /// Validate title and the group's privacy constraint.
    pub fn validate(&self, group: Option<&Group>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add(fields::TITLE, "can't be blank");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                fields::TITLE,
                format!("is too long (maximum is {} characters)", MAX_TITLE_LEN),
            );
        }
        privacy_is_permitted_by_group(self.private, group, &mut errors);
        errors
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Archive at `now`. An already archived discussion keeps its timestamp.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        if self.archived_at.is_none() {
            self.archived_at = Some(now);
            self.updated_at = now;
        }
    }

    pub fn viewed(&mut self) {
        self.total_views += 1;
    }

    pub fn motion_created(&mut self) {
        self.motions_count += 1;
    }

    pub fn motion_destroyed(&mut self) {
        self.motions_count = self.motions_count.saturating_sub(1);
    }

    pub fn comment_added(&mut self, comment: &Comment) {
        self.comments_count += 1;
        self.last_comment_at = Some(match self.last_comment_at {
            Some(last) if last > comment.created_at => last,
            _ => comment.created_at,
        });
    }

    /// Recompute comment-derived fields from the remaining comments.
    pub fn refresh_comment_stats(&mut self, comments: &[Comment]) {
        self.comments_count = comments.len() as u32;
        self.last_comment_at = latest_comment_at(comments);
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }

    /// Case-insensitive substring match on the title.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }

    /// Apply `changes`, returning the names of fields whose value changed.
    pub fn apply(&mut self, changes: &DiscussionChanges) -> BTreeSet<&'static str> {
        let mut changed = BTreeSet::new();
        if let Some(title) = &changes.title
            && *title != self.title
        {
            self.title = title.clone();
            changed.insert(fields::TITLE);
        }
        if let Some(description) = &changes.description
            && *description != self.description
        {
            self.description = description.clone();
            changed.insert(fields::DESCRIPTION);
        }
        if let Some(private) = changes.private
            && private != self.private
        {
            self.private = private;
            changed.insert(fields::PRIVATE);
        }
        if let Some(author_id) = changes.author_id
            && author_id != self.author_id
        {
            self.author_id = author_id;
            changed.insert(fields::AUTHOR);
        }
        changed
    }
}

/// Attributes for a discussion that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub group_id: Option<GroupId>,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub private: Option<bool>,
}

impl NewDiscussion {
    pub fn new(author_id: UserId, title: impl Into<String>) -> Self {
        Self {
            group_id: None,
            author_id,
            title: title.into(),
            description: String::new(),
            private: None,
        }
    }

    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = Some(private);
        self
    }

    /// Build the discussion, inheriting privacy from `group`.
    pub fn build(self, id: DiscussionId, group: Option<&Group>, now: DateTime<Utc>) -> Discussion {
        Discussion {
            id,
            group_id: self.group_id,
            author_id: self.author_id,
            title: self.title,
            description: self.description,
            private: inherit_privacy(self.private, group),
            archived_at: None,
            total_views: 0,
            motions_count: 0,
            comments_count: 0,
            last_comment_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Edits to an existing discussion; `None` leaves a field unchanged
///
/// `private` is doubly optional: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub private: Option<Option<bool>>,
    pub author_id: Option<UserId>,
}

impl DiscussionChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn private(mut self, private: Option<bool>) -> Self {
        self.private = Some(private);
        self
    }

    pub fn author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }
}
