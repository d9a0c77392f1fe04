//! Membership of a user in a group

use crate::core::ids::{GroupId, MembershipId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's membership in a group
///
/// `following_by_default` decides whether the member follows discussions in
/// the group they have never explicitly followed or unfollowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub following_by_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(
        id: MembershipId,
        group_id: GroupId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            group_id,
            user_id,
            following_by_default: false,
            created_at,
        }
    }

    pub fn follow_by_default(&mut self) {
        self.following_by_default = true;
    }

    pub fn dont_follow_by_default(&mut self) {
        self.following_by_default = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follow_toggle() {
        let mut membership = Membership::new(
            MembershipId::new(1),
            GroupId::new(1),
            UserId::new(1),
            Utc::now(),
        );
        assert!(!membership.following_by_default);

        membership.follow_by_default();
        assert!(membership.following_by_default);

        membership.dont_follow_by_default();
        assert!(!membership.following_by_default);
    }
}
