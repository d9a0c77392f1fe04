//! Participant computation
//!
//! Participants are everyone who has engaged with a discussion (its author,
//! commenters and the authors of any motion, open or closed) who is still a
//! member of the group when asked.

use crate::comment::Comment;
use crate::core::ids::UserId;
use crate::group::Membership;
use crate::motion::Motion;
use std::collections::BTreeSet;

/// Everyone who has engaged with the discussion, regardless of membership.
pub fn engaged_users(author_id: UserId, comments: &[Comment], motions: &[Motion]) -> BTreeSet<UserId> {
    std::iter::once(author_id)
        .chain(comments.iter().map(|c| c.author_id))
        .chain(motions.iter().map(|m| m.author_id))
        .collect()
}

/// Engaged users intersected with the group's current members.
pub fn participants(
    author_id: UserId,
    comments: &[Comment],
    motions: &[Motion],
    members: &[Membership],
) -> BTreeSet<UserId> {
    let current: BTreeSet<UserId> = members.iter().map(|m| m.user_id).collect();
    engaged_users(author_id, comments, motions)
        .intersection(&current)
        .copied()
        .collect()
}
