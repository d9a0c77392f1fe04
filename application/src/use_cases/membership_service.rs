//! Users, groups and memberships.

use crate::ports::activity_log::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::clock::Clock;
use crate::ports::persistence::Store;
use crate::use_cases::error::ServiceError;
use crate::use_cases::shared::{require_group, require_user};
use agora_domain::{
    DomainError, Group, GroupId, Membership, MembershipId, NewGroup, NewUser, User, UserId,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct MembershipService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    activity: Arc<dyn ActivityLogger>,
}

impl MembershipService {
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

    pub async fn register_user(&self, new: NewUser) -> Result<User, ServiceError> {
        let user = new.into_user(UserId::new(self.store.next_id().await?));
        self.store.save_user(&user).await?;
        debug!("Registered user {} ({})", user.id, user.name);
        Ok(user)
    }

    pub async fn create_group(&self, new: NewGroup) -> Result<Group, ServiceError> {
        let group = new.into_group(GroupId::new(self.store.next_id().await?), self.clock.now());
        self.store.save_group(&group).await?;
        info!(
            "Created group {} '{}' ({})",
            group.id, group.name, group.discussion_privacy_options
        );
        Ok(group)
    }

    /// Add `user_id` to the group; an existing membership is returned as is.
    pub async fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Membership, ServiceError> {
        require_group(&*self.store, group_id).await?;
        require_user(&*self.store, user_id).await?;
        if let Some(existing) = self.store.find_membership(group_id, user_id).await? {
            return Ok(existing);
        }

        let membership = Membership::new(
            MembershipId::new(self.store.next_id().await?),
            group_id,
            user_id,
            self.clock.now(),
        );
        self.store.save_membership(&membership).await?;

        self.activity.log(ActivityEvent::new(
            "member_added",
            json!({ "group_id": group_id, "user_id": user_id }),
        ));
        Ok(membership)
    }

    /// Remove `user_id` from the group. Their past activity stays in place.
    pub async fn remove_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, ServiceError> {
        let removed = self.store.delete_membership(group_id, user_id).await?;
        if removed {
            self.activity.log(ActivityEvent::new(
                "member_removed",
                json!({ "group_id": group_id, "user_id": user_id }),
            ));
        }
        Ok(removed)
    }

    pub async fn set_follow_by_default(
        &self,
        group_id: GroupId,
        user_id: UserId,
        follow: bool,
    ) -> Result<Membership, ServiceError> {
        let mut membership = self
            .store
            .find_membership(group_id, user_id)
            .await?
            .ok_or(DomainError::NotAMember {
                user: user_id,
                group: group_id,
            })?;
        if follow {
            membership.follow_by_default();
        } else {
            membership.dont_follow_by_default();
        }
        self.store.save_membership(&membership).await?;
        Ok(membership)
    }

    pub async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, ServiceError> {
        Ok(self.store.find_membership(group_id, user_id).await?.is_some())
    }

    pub async fn members(&self, group_id: GroupId) -> Result<Vec<Membership>, ServiceError> {
        require_group(&*self.store, group_id).await?;
        Ok(self.store.memberships_in_group(group_id).await?)
    }
}
