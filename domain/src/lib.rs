//! Domain layer for agora
//!
//! This crate contains the entities, value objects and pure rules of the
//! discussion engine. It has no dependencies on persistence, logging or
//! presentation concerns; everything that needs the outside world takes the
//! data it needs (and the current time) as arguments.
//!
//! # Core Concepts
//!
//! - **Discussion**: the aggregate root, owned by a [`Group`]
//! - **Motion**: a proposal within a discussion, open until closed
//! - **DiscussionReader**: per-user follow/read/view state
//! - **Membership**: a user's place in a group, with a default-follow flag
//! - **Version**: an audit-trail entry for tracked field changes

pub mod comment;
pub mod config;
pub mod core;
pub mod discussion;
pub mod group;
pub mod motion;
pub mod user;
pub mod versioning;

// Re-export commonly used types
pub use comment::Comment;
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    ids::{
        CommentId, DiscussionId, GroupId, MembershipId, MotionId, ReaderId, UserId, VersionId,
        VoteId,
    },
    validation::{FieldError, ValidationErrors},
};
pub use discussion::{Discussion, DiscussionChanges, DiscussionReader, NewDiscussion};
pub use group::{Group, Membership, NewGroup, PrivacyOptions};
pub use motion::{Motion, NewMotion, NewVote, Position, Vote};
pub use user::{NewUser, User};
pub use versioning::{NewVersion, TrackedFields, Version, VersionEvent};
