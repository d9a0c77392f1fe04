//! Motion entity
//!
//! A motion is a proposal attached to a discussion. It is open until its
//! `closed_at` passes; a motion whose `closed_at` equals the current instant
//! is already closed.

use crate::core::error::DomainError;
use crate::core::ids::{DiscussionId, MotionId, UserId};
use crate::core::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposal put to the group within a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub id: MotionId,
    pub discussion_id: DiscussionId,
    pub author_id: UserId,
    pub name: String,
    pub description: String,
    /// Closing instant; `None` keeps the motion open indefinitely
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Motion {
    /// Whether the motion is still open at `now` (`closed_at` strictly after `now`).
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self.closed_at {
            None => true,
            Some(closed_at) => closed_at > now,
        }
    }

    /// Close the motion at `now`.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_current(now) {
            return Err(DomainError::MotionClosed(self.id));
        }
        self.closed_at = Some(now);
        Ok(())
    }
}

/// Attributes for a motion that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMotion {
    pub discussion_id: DiscussionId,
    pub author_id: UserId,
    pub name: String,
    pub description: String,
    pub closing_at: Option<DateTime<Utc>>,
}

impl NewMotion {
    pub fn new(discussion_id: DiscussionId, author_id: UserId, name: impl Into<String>) -> Self {
        Self {
            discussion_id,
            author_id,
            name: name.into(),
            description: String::new(),
            closing_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn closing_at(mut self, closing_at: DateTime<Utc>) -> Self {
        self.closing_at = Some(closing_at);
        self
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "can't be blank");
        }
        errors
    }

    pub fn into_motion(self, id: MotionId, created_at: DateTime<Utc>) -> Motion {
        Motion {
            id,
            discussion_id: self.discussion_id,
            author_id: self.author_id,
            name: self.name,
            description: self.description,
            closed_at: self.closing_at,
            created_at,
        }
    }
}

/// The most recently created motion still open at `now`.
pub fn current_motion(motions: &[Motion], now: DateTime<Utc>) -> Option<&Motion> {
    motions
        .iter()
        .filter(|m| m.is_current(now))
        .max_by_key(|m| (m.created_at, m.id))
}
