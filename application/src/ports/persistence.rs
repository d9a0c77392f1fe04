//! Persistence port
//!
//! Defines the storage contracts the use cases rely on. Each entity gets a
//! small repository trait; [`Store`] bundles them so services can hold a
//! single `Arc<dyn Store>`. Implementations (adapters) live in the
//! infrastructure layer.
//!
//! Repositories never run cascades or callbacks: saving stores exactly the
//! entity given, deleting removes exactly what was asked for.

use agora_domain::{
    Comment, CommentId, Discussion, DiscussionId, DiscussionReader, Group, GroupId, Membership,
    Motion, MotionId, User, UserId, Vote, VoteId,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Identifier allocation shared by all entities
#[async_trait]
pub trait IdSequence: Send + Sync {
    /// Next unused identifier
    async fn next_id(&self) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn save_group(&self, group: &Group) -> Result<(), RepositoryError>;

    async fn find_group(&self, id: GroupId) -> Result<Option<Group>, RepositoryError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn save_membership(&self, membership: &Membership) -> Result<(), RepositoryError>;

    async fn find_membership(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Option<Membership>, RepositoryError>;

    /// Current memberships of a group, ordered by user id
    async fn memberships_in_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<Membership>, RepositoryError>;

    /// Returns whether a membership was removed
    async fn delete_membership(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    async fn save_discussion(&self, discussion: &Discussion) -> Result<(), RepositoryError>;

    async fn find_discussion(
        &self,
        id: DiscussionId,
    ) -> Result<Option<Discussion>, RepositoryError>;

    /// Discussions authored by a user, ordered by id
    async fn discussions_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<Discussion>, RepositoryError>;

    async fn delete_discussion(&self, id: DiscussionId) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ReaderRepository: Send + Sync {
    async fn save_reader(&self, reader: &DiscussionReader) -> Result<(), RepositoryError>;

    async fn find_reader(
        &self,
        discussion_id: DiscussionId,
        user_id: UserId,
    ) -> Result<Option<DiscussionReader>, RepositoryError>;

    async fn readers_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<DiscussionReader>, RepositoryError>;

    /// Returns the number of readers removed
    async fn delete_readers_for(&self, discussion_id: DiscussionId)
    -> Result<usize, RepositoryError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn save_comment(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn find_comment(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError>;

    /// Comments on a discussion, oldest first
    async fn comments_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Comment>, RepositoryError>;

    async fn delete_comment(&self, id: CommentId) -> Result<bool, RepositoryError>;

    async fn delete_comments_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<usize, RepositoryError>;
}

#[async_trait]
pub trait MotionRepository: Send + Sync {
    async fn save_motion(&self, motion: &Motion) -> Result<(), RepositoryError>;

    async fn find_motion(&self, id: MotionId) -> Result<Option<Motion>, RepositoryError>;

    /// Motions of a discussion, oldest first
    async fn motions_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Motion>, RepositoryError>;

    async fn delete_motion(&self, id: MotionId) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn save_vote(&self, vote: &Vote) -> Result<(), RepositoryError>;

    async fn find_vote(&self, id: VoteId) -> Result<Option<Vote>, RepositoryError>;

    async fn votes_for(&self, motion_id: MotionId) -> Result<Vec<Vote>, RepositoryError>;

    async fn delete_votes_for(&self, motion_id: MotionId) -> Result<usize, RepositoryError>;
}

/// Every repository the services need, behind one handle
pub trait Store:
    IdSequence
    + UserRepository
    + GroupRepository
    + MembershipRepository
    + DiscussionRepository
    + ReaderRepository
    + CommentRepository
    + MotionRepository
    + VoteRepository
{
}

impl<T> Store for T where
    T: IdSequence
        + UserRepository
        + GroupRepository
        + MembershipRepository
        + DiscussionRepository
        + ReaderRepository
        + CommentRepository
        + MotionRepository
        + VoteRepository
{
}
