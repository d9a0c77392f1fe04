//! Discussion aggregate and its rules.
//!
//! - [`entities::Discussion`]: the aggregate root (archive, views, counters)
//! - [`privacy`]: privacy inheritance from the group and its validation
//! - [`reader::DiscussionReader`]: per-user read/follow/view state
//! - [`followers`]: who follows a discussion
//! - [`participants`]: who has engaged and is still a member

pub mod entities;
pub mod followers;
pub mod participants;
pub mod privacy;
pub mod reader;

pub use entities::{Discussion, DiscussionChanges, MAX_TITLE_LEN, NewDiscussion, fields};
pub use followers::resolve_followers;
pub use participants::participants;
pub use reader::DiscussionReader;
