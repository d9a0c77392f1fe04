//! Domain error types

use crate::core::ids::{DiscussionId, GroupId, MotionId, UserId};
use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("User {user} is not a member of group {group}")]
    NotAMember { user: UserId, group: GroupId },

    #[error("Motion {0} is closed")]
    MotionClosed(MotionId),

    #[error("Discussion {0} has been deleted")]
    DiscussionDeleted(DiscussionId),
}

impl DomainError {
    /// Check if this error carries validation errors
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    /// Validation errors carried by this error, if any
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            DomainError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}
