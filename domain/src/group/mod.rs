//! Groups and memberships.
//!
//! - [`entities::Group`]: owns discussions and constrains their privacy
//! - [`entities::PrivacyOptions`]: the group-level privacy setting
//! - [`membership::Membership`]: per-user membership with default-follow flag

pub mod entities;
pub mod membership;

pub use entities::{Group, NewGroup, PrivacyOptions};
pub use membership::Membership;
