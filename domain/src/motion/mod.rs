//! Motions and votes.
//!
//! - [`entities::Motion`]: a proposal within a discussion, open until closed
//! - [`vote::Vote`]: a member's position on a motion

pub mod entities;
pub mod vote;

pub use entities::{Motion, NewMotion, current_motion};
pub use vote::{NewVote, Position, Vote};
