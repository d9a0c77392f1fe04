//! Use cases (application services)
//!
//! - [`discussion_service::DiscussionService`]: discussion lifecycle, readers,
//!   followers, participants, comments, versions and delayed destroy
//! - [`motion_service::MotionService`]: motions, closing and votes
//! - [`membership_service::MembershipService`]: users, groups and memberships
//! - [`run_ci::RunCiUseCase`]: sequential test-suite runs

pub mod discussion_service;
pub mod error;
pub mod membership_service;
pub mod motion_service;
pub mod run_ci;
mod shared;
