//! Application layer for agora
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CiConfig, TestSuite};
pub use ports::{
    activity_log::{ActivityEvent, ActivityLogger, NoActivityLogger},
    clock::Clock,
    persistence::{RepositoryError, Store},
    progress::{CiProgressNotifier, NoCiProgress},
    suite_runner::{SuiteOutcome, SuiteRunner, SuiteRunnerError},
    version_log::{VersionLog, VersionLogError},
};
pub use use_cases::discussion_service::{DestroyedDiscussion, DiscussionService, DiscussionSummary};
pub use use_cases::error::ServiceError;
pub use use_cases::membership_service::MembershipService;
pub use use_cases::motion_service::MotionService;
pub use use_cases::run_ci::{CiReport, RunCiError, RunCiUseCase};
