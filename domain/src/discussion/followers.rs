//! Follower resolution
//!
//! A member follows a discussion when their reader says so explicitly, or
//! when they follow the group by default and never chose otherwise. An
//! explicit unfollow beats the group default. Non-members never follow.

use super::reader::DiscussionReader;
use crate::core::ids::UserId;
use crate::group::Membership;
use std::collections::{BTreeSet, HashMap};

/// Whether one member follows, given their membership and optional reader.
pub fn is_following(membership: &Membership, reader: Option<&DiscussionReader>) -> bool {
    match reader.and_then(|r| r.following) {
        Some(explicit) => explicit,
        None => membership.following_by_default,
    }
}

/// Followers among `memberships` of the discussion's group.
///
/// `readers` may contain records of users who have left the group; they are
/// ignored.
pub fn resolve_followers(
    memberships: &[Membership],
    readers: &[DiscussionReader],
) -> BTreeSet<UserId> {
    let by_user: HashMap<UserId, &DiscussionReader> =
        readers.iter().map(|r| (r.user_id, r)).collect();

    memberships
        .iter()
        .filter(|m| is_following(m, by_user.get(&m.user_id).copied()))
        .map(|m| m.user_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{DiscussionId, GroupId, MembershipId, ReaderId};
    use chrono::Utc;

    fn membership(user: u64, by_default: bool) -> Membership {
        let mut m = Membership::new(
            MembershipId::new(user),
            GroupId::new(1),
            UserId::new(user),
            Utc::now(),
        );
        m.following_by_default = by_default;
        m
    }

    fn reader(user: u64, following: Option<bool>) -> DiscussionReader {
        let mut r = DiscussionReader::new(ReaderId::new(user), DiscussionId::new(1), UserId::new(user));
        r.following = following;
        r
    }

    #[test]
    fn test_follower_resolution() {
        // 1: explicit follower, 2: default follower, 3: default but unfollowed,
        // 4: plain member, 5: non-member who followed
        let memberships = vec![
            membership(1, false),
            membership(2, true),
            membership(3, true),
            membership(4, false),
        ];
        let readers = vec![
            reader(1, Some(true)),
            reader(3, Some(false)),
            reader(5, Some(true)),
        ];

        let followers = resolve_followers(&memberships, &readers);
        assert_eq!(
            followers.into_iter().collect::<Vec<_>>(),
            vec![UserId::new(1), UserId::new(2)]
        );
    }

    #[test]
    fn test_reader_without_choice_defers_to_membership() {
        assert!(is_following(&membership(1, true), Some(&reader(1, None))));
        assert!(!is_following(&membership(1, false), Some(&reader(1, None))));
    }

    #[test]
    fn test_no_members_no_followers() {
        assert!(resolve_followers(&[], &[reader(1, Some(true))]).is_empty());
    }
}
