//! Discussion service.
//!
//! Every side effect a discussion operation has is spelled out here as an
//! explicit step: deleting a comment refreshes the discussion and resets
//! every reader, destroying a discussion removes votes, motions, comments and
//! readers before the discussion itself. Repositories never cascade.

use crate::ports::activity_log::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::clock::Clock;
use crate::ports::persistence::Store;
use crate::ports::version_log::VersionLog;
use crate::use_cases::error::ServiceError;
use crate::use_cases::shared::{
    ensure_member, group_of, require_discussion, require_group, require_user,
};
use agora_domain::comment::validate_body;
use agora_domain::discussion::{followers, participants};
use agora_domain::motion::current_motion;
use agora_domain::versioning::last_versioned_at;
use agora_domain::{
    Comment, CommentId, Discussion, DiscussionChanges, DiscussionId, DiscussionReader, Motion,
    NewDiscussion, ReaderId, TrackedFields, UserId, ValidationErrors, Version,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the CLI report shows about one discussion
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionSummary {
    pub discussion: Discussion,
    pub followers: Vec<UserId>,
    pub participants: Vec<UserId>,
    pub current_motion: Option<Motion>,
    pub last_versioned_at: DateTime<Utc>,
    pub version_count: usize,
}

/// What a delayed destroy removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DestroyedDiscussion {
    pub discussion_id: DiscussionId,
    pub motions_removed: usize,
    pub votes_removed: usize,
    pub comments_removed: usize,
    pub readers_removed: usize,
}

/// Use case holder for discussion operations.
#[derive(Clone)]
pub struct DiscussionService {
    store: Arc<dyn Store>,
    versions: Arc<dyn VersionLog>,
    clock: Arc<dyn Clock>,
    tracked_fields: TrackedFields,
    activity: Arc<dyn ActivityLogger>,
}

impl DiscussionService {
    pub fn new(store: Arc<dyn Store>, versions: Arc<dyn VersionLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            versions,
            clock,
            tracked_fields: TrackedFields::default(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    /// Replace the audit-trail allow-list.
    pub fn with_tracked_fields(mut self, tracked_fields: TrackedFields) -> Self {
        self.tracked_fields = tracked_fields;
        self
    }

    /// Create with an activity logger.
    pub fn with_activity_logger(mut self, logger: Arc<dyn ActivityLogger>) -> Self {
        self.activity = logger;
        self
    }

    pub fn tracked_fields(&self) -> &TrackedFields {
        &self.tracked_fields
    }

    // ==================== Lifecycle ====================

    /// Create a discussion, inheriting privacy from its group.
    pub async fn create(&self, new: NewDiscussion) -> Result<Discussion, ServiceError> {
        require_user(&*self.store, new.author_id).await?;
        let group = match new.group_id {
            Some(id) => Some(require_group(&*self.store, id).await?),
            None => None,
        };
        ensure_member(&*self.store, new.group_id, new.author_id).await?;

        let id = DiscussionId::new(self.store.next_id().await?);
        let discussion = new.build(id, group.as_ref(), self.clock.now());
        discussion.validate(group.as_ref()).into_result()?;
        self.store.save_discussion(&discussion).await?;

        info!(
            "Created discussion {} '{}' (private: {:?})",
            discussion.id, discussion.title, discussion.private
        );
        self.activity.log(ActivityEvent::new(
            "discussion_created",
            json!({
                "discussion_id": discussion.id,
                "group_id": discussion.group_id,
                "author_id": discussion.author_id,
                "private": discussion.private,
            }),
        ));
        Ok(discussion)
    }

    pub async fn find(&self, id: DiscussionId) -> Result<Option<Discussion>, ServiceError> {
        Ok(self.store.find_discussion(id).await?)
    }

    /// Run validation against the discussion's group without saving.
    pub async fn validate(&self, discussion: &Discussion) -> Result<ValidationErrors, ServiceError> {
        let group = group_of(&*self.store, discussion).await?;
        Ok(discussion.validate(group.as_ref()))
    }

    /// Apply edits and append a version when a tracked field changed.
    pub async fn update(
        &self,
        id: DiscussionId,
        changes: DiscussionChanges,
        actor: Option<UserId>,
    ) -> Result<Discussion, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        if let Some(author_id) = changes.author_id {
            require_user(&*self.store, author_id).await?;
        }

        let changed = discussion.apply(&changes);
        if changed.is_empty() {
            debug!("Update of discussion {} changed nothing", id);
            return Ok(discussion);
        }

        let group = group_of(&*self.store, &discussion).await?;
        discussion.validate(group.as_ref()).into_result()?;

        let now = self.clock.now();
        discussion.updated_at = now;
        self.store.save_discussion(&discussion).await?;

        match self.tracked_fields.version_for_update(
            id,
            changed.iter().copied(),
            actor,
            now,
        ) {
            Some(version) => {
                let version = self.versions.append(version).await?;
                debug!(
                    "Discussion {} versioned ({:?})",
                    id, version.changed_fields
                );
            }
            None => debug!("Discussion {} changed untracked fields {:?}", id, changed),
        }

        self.activity.log(ActivityEvent::new(
            "discussion_updated",
            json!({
                "discussion_id": id,
                "changed_fields": changed,
                "actor_id": actor,
            }),
        ));
        Ok(discussion)
    }

    /// Set `archived_at`; archiving twice keeps the first timestamp.
    pub async fn archive(&self, id: DiscussionId) -> Result<Discussion, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        if discussion.is_archived() {
            return Ok(discussion);
        }
        discussion.archive(self.clock.now());
        self.store.save_discussion(&discussion).await?;

        info!("Archived discussion {}", id);
        self.activity.log(ActivityEvent::new(
            "discussion_archived",
            json!({ "discussion_id": id, "archived_at": discussion.archived_at }),
        ));
        Ok(discussion)
    }

    /// Count one view of the discussion.
    pub async fn viewed(&self, id: DiscussionId) -> Result<Discussion, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        discussion.viewed();
        self.store.save_discussion(&discussion).await?;
        Ok(discussion)
    }

    /// Count a view and mark everything so far as read for `user_id`.
    pub async fn viewed_by(
        &self,
        id: DiscussionId,
        user_id: UserId,
    ) -> Result<DiscussionReader, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        require_user(&*self.store, user_id).await?;
        let mut reader = self.reader_or_new(&discussion, user_id).await?;

        discussion.viewed();
        self.store.save_discussion(&discussion).await?;
        reader.viewed(self.clock.now(), discussion.comments_count);
        self.store.save_reader(&reader).await?;
        Ok(reader)
    }

    /// Discussions authored by `user_id` whose title contains `query`.
    pub async fn search_user_discussions(
        &self,
        user_id: UserId,
        query: &str,
    ) -> Result<Vec<Discussion>, ServiceError> {
        let results: Vec<Discussion> = self
            .store
            .discussions_by_author(user_id)
            .await?
            .into_iter()
            .filter(|d| !d.is_deleted && d.title_matches(query))
            .collect();
        debug!(
            "Search '{}' in discussions of user {}: {} result(s)",
            query,
            user_id,
            results.len()
        );
        Ok(results)
    }

    // ==================== Readers & Followers ====================

    pub async fn reader(
        &self,
        id: DiscussionId,
        user_id: UserId,
    ) -> Result<Option<DiscussionReader>, ServiceError> {
        Ok(self.store.find_reader(id, user_id).await?)
    }

    pub async fn follow(
        &self,
        id: DiscussionId,
        user_id: UserId,
    ) -> Result<DiscussionReader, ServiceError> {
        self.set_following(id, user_id, true).await
    }

    pub async fn unfollow(
        &self,
        id: DiscussionId,
        user_id: UserId,
    ) -> Result<DiscussionReader, ServiceError> {
        self.set_following(id, user_id, false).await
    }

    async fn set_following(
        &self,
        id: DiscussionId,
        user_id: UserId,
        following: bool,
    ) -> Result<DiscussionReader, ServiceError> {
        let discussion = require_discussion(&*self.store, id).await?;
        require_user(&*self.store, user_id).await?;

        let mut reader = self.reader_or_new(&discussion, user_id).await?;
        if following {
            reader.follow();
        } else {
            reader.unfollow();
        }
        self.store.save_reader(&reader).await?;
        Ok(reader)
    }

    async fn reader_or_new(
        &self,
        discussion: &Discussion,
        user_id: UserId,
    ) -> Result<DiscussionReader, ServiceError> {
        match self.store.find_reader(discussion.id, user_id).await? {
            Some(reader) => Ok(reader),
            None => {
                let id = ReaderId::new(self.store.next_id().await?);
                Ok(DiscussionReader::new(id, discussion.id, user_id))
            }
        }
    }

    /// Members following the discussion, ordered by user id.
    pub async fn followers(&self, id: DiscussionId) -> Result<Vec<UserId>, ServiceError> {
        let discussion = require_discussion(&*self.store, id).await?;
        let Some(group_id) = discussion.group_id else {
            return Ok(Vec::new());
        };
        let memberships = self.store.memberships_in_group(group_id).await?;
        let readers = self.store.readers_for(id).await?;
        Ok(followers::resolve_followers(&memberships, &readers)
            .into_iter()
            .collect())
    }

    /// Author, commenters and motion authors still in the group.
    pub async fn participants(&self, id: DiscussionId) -> Result<Vec<UserId>, ServiceError> {
        let discussion = require_discussion(&*self.store, id).await?;
        let Some(group_id) = discussion.group_id else {
            return Ok(Vec::new());
        };
        let members = self.store.memberships_in_group(group_id).await?;
        let comments = self.store.comments_for(id).await?;
        let motions = self.store.motions_for(id).await?;
        Ok(participants::participants(
            discussion.author_id,
            &comments,
            &motions,
            &members,
        )
        .into_iter()
        .collect())
    }

    // ==================== Comments ====================

    /// Post a comment and bump the discussion's comment stats.
    pub async fn add_comment(
        &self,
        id: DiscussionId,
        author_id: UserId,
        body: &str,
    ) -> Result<Comment, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        validate_body(body).into_result()?;
        require_user(&*self.store, author_id).await?;
        ensure_member(&*self.store, discussion.group_id, author_id).await?;

        let comment = Comment {
            id: CommentId::new(self.store.next_id().await?),
            discussion_id: id,
            author_id,
            body: body.to_string(),
            created_at: self.clock.now(),
        };
        self.store.save_comment(&comment).await?;

        discussion.comment_added(&comment);
        self.store.save_discussion(&discussion).await?;

        debug!("Comment {} added to discussion {}", comment.id, id);
        self.activity.log(ActivityEvent::new(
            "comment_added",
            json!({
                "discussion_id": id,
                "comment_id": comment.id,
                "author_id": author_id,
            }),
        ));
        Ok(comment)
    }

    /// Remove a comment, then run [`Self::comment_deleted`] on its discussion.
    pub async fn delete_comment(&self, comment_id: CommentId) -> Result<Discussion, ServiceError> {
        let comment = self
            .store
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.get()))?;
        self.store.delete_comment(comment_id).await?;

        self.activity.log(ActivityEvent::new(
            "comment_deleted",
            json!({ "discussion_id": comment.discussion_id, "comment_id": comment_id }),
        ));
        self.comment_deleted(comment.discussion_id).await
    }

    /// Recompute `last_comment_at` and reset every reader's counts.
    pub async fn comment_deleted(&self, id: DiscussionId) -> Result<Discussion, ServiceError> {
        let mut discussion = require_discussion(&*self.store, id).await?;
        let comments = self.store.comments_for(id).await?;

        discussion.refresh_comment_stats(&comments);
        self.store.save_discussion(&discussion).await?;

        let readers = self.store.readers_for(id).await?;
        for mut reader in readers {
            reader.reset_counts(&comments);
            self.store.save_reader(&reader).await?;
        }
        debug!(
            "Discussion {} refreshed after comment deletion ({} comment(s) left)",
            id,
            comments.len()
        );
        Ok(discussion)
    }

    // ==================== Motions & Versions ====================

    /// The most recently created motion that is still open.
    pub async fn current_motion(&self, id: DiscussionId) -> Result<Option<Motion>, ServiceError> {
        require_discussion(&*self.store, id).await?;
        let motions = self.store.motions_for(id).await?;
        Ok(current_motion(&motions, self.clock.now()).cloned())
    }

    pub async fn versions(&self, id: DiscussionId) -> Result<Vec<Version>, ServiceError> {
        require_discussion(&*self.store, id).await?;
        Ok(self.versions.versions_for(id).await?)
    }

    /// `created_at` of the last appended version, or of the discussion when unversioned.
    pub async fn last_versioned_at(&self, id: DiscussionId) -> Result<DateTime<Utc>, ServiceError> {
        let discussion = require_discussion(&*self.store, id).await?;
        let versions = self.versions.versions_for(id).await?;
        Ok(last_versioned_at(&discussion, &versions))
    }

    // ==================== Destroy ====================

    /// Mark the discussion deleted, then remove it and everything under it.
    pub async fn delayed_destroy(&self, id: DiscussionId) -> Result<DestroyedDiscussion, ServiceError> {
        let mut discussion = self
            .store
            .find_discussion(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Discussion", id.get()))?;

        // 1. Mark
        discussion.mark_deleted();
        self.store.save_discussion(&discussion).await?;
        info!("Discussion {} marked deleted", id);

        // 2. Votes, 3. motions
        let motions = self.store.motions_for(id).await?;
        let mut votes_removed = 0;
        for motion in &motions {
            votes_removed += self.store.delete_votes_for(motion.id).await?;
        }
        for motion in &motions {
            self.store.delete_motion(motion.id).await?;
        }

        // 4. Comments and readers
        let comments_removed = self.store.delete_comments_for(id).await?;
        let readers_removed = self.store.delete_readers_for(id).await?;

        // 5. The discussion itself
        self.store.delete_discussion(id).await?;

        let destroyed = DestroyedDiscussion {
            discussion_id: id,
            motions_removed: motions.len(),
            votes_removed,
            comments_removed,
            readers_removed,
        };
        info!(
            "Destroyed discussion {} ({} motion(s), {} vote(s), {} comment(s))",
            id, destroyed.motions_removed, destroyed.votes_removed, destroyed.comments_removed
        );
        self.activity.log(ActivityEvent::new(
            "discussion_destroyed",
            json!(destroyed),
        ));
        Ok(destroyed)
    }

    // ==================== Reporting ====================

    pub async fn summarize(&self, id: DiscussionId) -> Result<DiscussionSummary, ServiceError> {
        let discussion = require_discussion(&*self.store, id).await?;
        let versions = self.versions.versions_for(id).await?;
        Ok(DiscussionSummary {
            followers: self.followers(id).await?,
            participants: self.participants(id).await?,
            current_motion: self.current_motion(id).await?,
            last_versioned_at: last_versioned_at(&discussion, &versions),
            version_count: versions.len(),
            discussion,
        })
    }
}
