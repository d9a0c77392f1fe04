//! Typed identifiers for domain entities.
//!
//! Every aggregate and entity is keyed by a `u64` allocated by the
//! persistence adapter. The newtypes keep a `MotionId` from being passed
//! where a `DiscussionId` is expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`User`](crate::user::User).
    UserId
);
entity_id!(
    /// Identifier of a [`Group`](crate::group::Group).
    GroupId
);
entity_id!(
    /// Identifier of a [`Membership`](crate::group::Membership).
    MembershipId
);
entity_id!(
    /// Identifier of a [`Discussion`](crate::discussion::Discussion).
    DiscussionId
);
entity_id!(
    /// Identifier of a [`DiscussionReader`](crate::discussion::DiscussionReader).
    ReaderId
);
entity_id!(
    /// Identifier of a [`Comment`](crate::comment::Comment).
    CommentId
);
entity_id!(
    /// Identifier of a [`Motion`](crate::motion::Motion).
    MotionId
);
entity_id!(
    /// Identifier of a [`Vote`](crate::motion::Vote).
    VoteId
);
entity_id!(
    /// Identifier of a [`Version`](crate::versioning::Version).
    VersionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_number() {
        assert_eq!(DiscussionId::new(42).to_string(), "42");
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
        let id: MotionId = serde_json::from_str("9").unwrap();
        assert_eq!(id.get(), 9);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(GroupId::new(1) < GroupId::new(2));
    }
}
