//! In-memory [`Store`](agora_application::Store) adapter.
//!
//! Every table lives behind one `RwLock`, so each repository call sees a
//! consistent snapshot. Identifiers come from a single sequence shared by
//! all entity kinds.

use agora_application::ports::persistence::{
    CommentRepository, DiscussionRepository, GroupRepository, IdSequence, MembershipRepository,
    MotionRepository, ReaderRepository, RepositoryError, UserRepository, VoteRepository,
};
use agora_domain::{
    Comment, CommentId, Discussion, DiscussionId, DiscussionReader, Group, GroupId, Membership,
    Motion, MotionId, User, UserId, Vote, VoteId,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    memberships: BTreeMap<(GroupId, UserId), Membership>,
    discussions: BTreeMap<DiscussionId, Discussion>,
    readers: BTreeMap<(DiscussionId, UserId), DiscussionReader>,
    comments: BTreeMap<CommentId, Comment>,
    motions: BTreeMap<MotionId, Motion>,
    votes: BTreeMap<VoteId, Vote>,
}

/// Process-local store backing the CLI and the behaviour tests
pub struct InMemoryStore {
    sequence: AtomicU64,
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest first, ties broken by id
fn chronological<T, K: Ord + Copy>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl IdSequence for InMemoryStore {
    async fn next_id(&self) -> Result<u64, RepositoryError> {
        Ok(self.sequence.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save_user(&self, user: &User) -> Result<(), RepositoryError> {
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn save_group(&self, group: &Group) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .groups
            .insert(group.id, group.clone());
        Ok(())
    }

    async fn find_group(&self, id: GroupId) -> Result<Option<Group>, RepositoryError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn save_membership(&self, membership: &Membership) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .memberships
            .insert((membership.group_id, membership.user_id), membership.clone());
        Ok(())
    }

    async fn find_membership(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Option<Membership>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .memberships
            .get(&(group_id, user_id))
            .cloned())
    }

    async fn memberships_in_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<Membership>, RepositoryError> {
        // Keys are (group, user), so the range is already ordered by user id
        Ok(self
            .tables
            .read()
            .await
            .memberships
            .range((group_id, UserId::new(0))..=(group_id, UserId::new(u64::MAX)))
            .map(|(_, m)| m.clone())
            .collect())
    }

    async fn delete_membership(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .tables
            .write()
            .await
            .memberships
            .remove(&(group_id, user_id))
            .is_some())
    }
}

#[async_trait]
impl DiscussionRepository for InMemoryStore {
    async fn save_discussion(&self, discussion: &Discussion) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .discussions
            .insert(discussion.id, discussion.clone());
        Ok(())
    }

    async fn find_discussion(
        &self,
        id: DiscussionId,
    ) -> Result<Option<Discussion>, RepositoryError> {
        Ok(self.tables.read().await.discussions.get(&id).cloned())
    }

    async fn discussions_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<Discussion>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .discussions
            .values()
            .filter(|d| d.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn delete_discussion(&self, id: DiscussionId) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.discussions.remove(&id).is_some())
    }
}

#[async_trait]
impl ReaderRepository for InMemoryStore {
    async fn save_reader(&self, reader: &DiscussionReader) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .readers
            .insert((reader.discussion_id, reader.user_id), reader.clone());
        Ok(())
    }

    async fn find_reader(
        &self,
        discussion_id: DiscussionId,
        user_id: UserId,
    ) -> Result<Option<DiscussionReader>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .readers
            .get(&(discussion_id, user_id))
            .cloned())
    }

    async fn readers_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<DiscussionReader>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .readers
            .values()
            .filter(|r| r.discussion_id == discussion_id)
            .cloned()
            .collect())
    }

    async fn delete_readers_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.readers.len();
        tables
            .readers
            .retain(|(discussion, _), _| *discussion != discussion_id);
        Ok(before - tables.readers.len())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn save_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_comment(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn comments_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let rows: Vec<Comment> = self
            .tables
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.discussion_id == discussion_id)
            .cloned()
            .collect();
        Ok(chronological(rows, |c| (c.created_at, c.id)))
    }

    async fn delete_comment(&self, id: CommentId) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }

    async fn delete_comments_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables
            .comments
            .retain(|_, c| c.discussion_id != discussion_id);
        Ok(before - tables.comments.len())
    }
}

#[async_trait]
impl MotionRepository for InMemoryStore {
    async fn save_motion(&self, motion: &Motion) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .motions
            .insert(motion.id, motion.clone());
        Ok(())
    }

    async fn find_motion(&self, id: MotionId) -> Result<Option<Motion>, RepositoryError> {
        Ok(self.tables.read().await.motions.get(&id).cloned())
    }

    async fn motions_for(
        &self,
        discussion_id: DiscussionId,
    ) -> Result<Vec<Motion>, RepositoryError> {
        let rows: Vec<Motion> = self
            .tables
            .read()
            .await
            .motions
            .values()
            .filter(|m| m.discussion_id == discussion_id)
            .cloned()
            .collect();
        Ok(chronological(rows, |m| (m.created_at, m.id)))
    }

    async fn delete_motion(&self, id: MotionId) -> Result<bool, RepositoryError> {
        Ok(self.tables.write().await.motions.remove(&id).is_some())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn save_vote(&self, vote: &Vote) -> Result<(), RepositoryError> {
        self.tables.write().await.votes.insert(vote.id, vote.clone());
        Ok(())
    }

    async fn find_vote(&self, id: VoteId) -> Result<Option<Vote>, RepositoryError> {
        Ok(self.tables.read().await.votes.get(&id).cloned())
    }

    async fn votes_for(&self, motion_id: MotionId) -> Result<Vec<Vote>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .votes
            .values()
            .filter(|v| v.motion_id == motion_id)
            .cloned()
            .collect())
    }

    async fn delete_votes_for(&self, motion_id: MotionId) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.votes.len();
        tables.votes.retain(|_, v| v.motion_id != motion_id);
        Ok(before - tables.votes.len())
    }
}
