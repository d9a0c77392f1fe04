//! Motion service.
//!
//! Keeps the discussion's `motions_count` in step with motion creation and
//! destruction, and closes motions (the `close` collaborator of a
//! discussion).

use crate::ports::activity_log::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::clock::Clock;
use crate::ports::persistence::Store;
use crate::use_cases::error::ServiceError;
use crate::use_cases::shared::{ensure_member, require_discussion, require_motion, require_user};
use agora_domain::{DomainError, Motion, MotionId, NewMotion, NewVote, Vote, VoteId};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct MotionService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    activity: Arc<dyn ActivityLogger>,
}

impl MotionService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, logger: Arc<dyn ActivityLogger>) -> Self {
        self.activity = logger;
        self
    }

    /// Create a motion and increment the discussion's motion counter.
    pub async fn create_motion(&self, new: NewMotion) -> Result<Motion, ServiceError> {
        let mut discussion = require_discussion(&*self.store, new.discussion_id).await?;
        new.validate().into_result()?;
        require_user(&*self.store, new.author_id).await?;
        ensure_member(&*self.store, discussion.group_id, new.author_id).await?;

        let id = MotionId::new(self.store.next_id().await?);
        let motion = new.into_motion(id, self.clock.now());
        self.store.save_motion(&motion).await?;

        discussion.motion_created();
        self.store.save_discussion(&discussion).await?;

        info!(
            "Motion {} '{}' created in discussion {} ({} motion(s))",
            motion.id, motion.name, discussion.id, discussion.motions_count
        );
        self.activity.log(ActivityEvent::new(
            "motion_created",
            json!({
                "motion_id": motion.id,
                "discussion_id": motion.discussion_id,
                "author_id": motion.author_id,
                "closed_at": motion.closed_at,
            }),
        ));
        Ok(motion)
    }

    pub async fn find(&self, id: MotionId) -> Result<Option<Motion>, ServiceError> {
        Ok(self.store.find_motion(id).await?)
    }

    /// Close an open motion now.
    pub async fn close_motion(&self, id: MotionId) -> Result<Motion, ServiceError> {
        let mut motion = require_motion(&*self.store, id).await?;
        motion.close(self.clock.now())?;
        self.store.save_motion(&motion).await?;

        info!("Motion {} closed", id);
        self.activity.log(ActivityEvent::new(
            "motion_closed",
            json!({ "motion_id": id, "closed_at": motion.closed_at }),
        ));
        Ok(motion)
    }

    /// Remove a motion with its votes and decrement the motion counter.
    pub async fn destroy_motion(&self, id: MotionId) -> Result<usize, ServiceError> {
        let motion = require_motion(&*self.store, id).await?;
        let votes_removed = self.store.delete_votes_for(id).await?;
        self.store.delete_motion(id).await?;

        match self.store.find_discussion(motion.discussion_id).await? {
            Some(mut discussion) => {
                discussion.motion_destroyed();
                self.store.save_discussion(&discussion).await?;
            }
            None => warn!(
                "Motion {} destroyed without its discussion {}",
                id, motion.discussion_id
            ),
        }

        debug!("Motion {} destroyed with {} vote(s)", id, votes_removed);
        self.activity.log(ActivityEvent::new(
            "motion_destroyed",
            json!({ "motion_id": id, "votes_removed": votes_removed }),
        ));
        Ok(votes_removed)
    }

    /// Record a member's vote on an open motion.
    pub async fn cast_vote(&self, new: NewVote) -> Result<Vote, ServiceError> {
        let motion = require_motion(&*self.store, new.motion_id).await?;
        let now = self.clock.now();
        if !motion.is_current(now) {
            return Err(DomainError::MotionClosed(motion.id).into());
        }
        let discussion = require_discussion(&*self.store, motion.discussion_id).await?;
        require_user(&*self.store, new.user_id).await?;
        ensure_member(&*self.store, discussion.group_id, new.user_id).await?;

        let vote = new.into_vote(VoteId::new(self.store.next_id().await?), now);
        self.store.save_vote(&vote).await?;

        self.activity.log(ActivityEvent::new(
            "vote_cast",
            json!({
                "vote_id": vote.id,
                "motion_id": vote.motion_id,
                "user_id": vote.user_id,
                "position": vote.position,
            }),
        ));
        Ok(vote)
    }

    pub async fn votes(&self, id: MotionId) -> Result<Vec<Vote>, ServiceError> {
        require_motion(&*self.store, id).await?;
        Ok(self.store.votes_for(id).await?)
    }
}
