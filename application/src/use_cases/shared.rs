//! Loading helpers shared by the services.
//!
//! Each `require_*` turns a missing record into [`ServiceError::NotFound`].

use crate::ports::persistence::Store;
use crate::use_cases::error::ServiceError;
use agora_domain::{
    Discussion, DiscussionId, DomainError, Group, GroupId, Motion, MotionId, User, UserId,
};

pub(crate) async fn require_user(store: &dyn Store, id: UserId) -> Result<User, ServiceError> {
    store
        .find_user(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id.get()))
}

pub(crate) async fn require_group(store: &dyn Store, id: GroupId) -> Result<Group, ServiceError> {
    store
        .find_group(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Group", id.get()))
}

/// The owning group of a discussion, if it has one.
pub(crate) async fn group_of(
    store: &dyn Store,
    discussion: &Discussion,
) -> Result<Option<Group>, ServiceError> {
    match discussion.group_id {
        Some(id) => Ok(Some(require_group(store, id).await?)),
        None => Ok(None),
    }
}

/// A live discussion; one marked deleted is rejected.
pub(crate) async fn require_discussion(
    store: &dyn Store,
    id: DiscussionId,
) -> Result<Discussion, ServiceError> {
    let discussion = store
        .find_discussion(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Discussion", id.get()))?;
    if discussion.is_deleted {
        return Err(DomainError::DiscussionDeleted(id).into());
    }
    Ok(discussion)
}

pub(crate) async fn require_motion(store: &dyn Store, id: MotionId) -> Result<Motion, ServiceError> {
    store
        .find_motion(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Motion", id.get()))
}

/// Acting inside a group requires membership; groupless discussions are open.
pub(crate) async fn ensure_member(
    store: &dyn Store,
    group_id: Option<GroupId>,
    user_id: UserId,
) -> Result<(), ServiceError> {
    let Some(group_id) = group_id else {
        return Ok(());
    };
    match store.find_membership(group_id, user_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::NotAMember {
            user: user_id,
            group: group_id,
        }
        .into()),
    }
}
