//! Comment entity

use crate::core::ids::{CommentId, DiscussionId, UserId};
use crate::core::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum comment body length in characters
pub const MAX_BODY_LEN: usize = 10_000;

/// A comment posted on a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub discussion_id: DiscussionId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Validate a comment body before it is stored.
pub fn validate_body(body: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if body.trim().is_empty() {
        errors.add("body", "can't be blank");
    } else if body.chars().count() > MAX_BODY_LEN {
        errors.add(
            "body",
            format!("is too long (maximum is {} characters)", MAX_BODY_LEN),
        );
    }
    errors
}

/// Creation time of the most recent comment, if any.
pub fn latest_comment_at(comments: &[Comment]) -> Option<DateTime<Utc>> {
    comments.iter().map(|c| c.created_at).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn comment(id: u64, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id: CommentId::new(id),
            discussion_id: DiscussionId::new(1),
            author_id: UserId::new(1),
            body: "hello".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_blank_body_is_invalid() {
        let errors = validate_body("   ");
        assert_eq!(errors.on("body").count(), 1);
        assert!(validate_body("Agreed.").is_empty());
    }

    #[test]
    fn test_overlong_body_is_invalid() {
        let body = "x".repeat(MAX_BODY_LEN + 1);
        assert_eq!(validate_body(&body).on("body").count(), 1);
    }

    #[test]
    fn test_latest_comment_at() {
        let now = Utc::now();
        let comments = vec![
            comment(1, now - Duration::hours(2)),
            comment(2, now),
            comment(3, now - Duration::hours(1)),
        ];
        assert_eq!(latest_comment_at(&comments), Some(now));
        assert_eq!(latest_comment_at(&[]), None);
    }
}
