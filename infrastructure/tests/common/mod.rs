//! Shared fixture for behaviour tests: services wired to in-memory adapters
//! and a manual clock.

#![allow(dead_code)]

use agora_application::ports::activity_log::{ActivityEvent, ActivityLogger};
use agora_application::{DiscussionService, MembershipService, MotionService};
use agora_domain::{
    Discussion, Group, NewDiscussion, NewGroup, NewUser, PrivacyOptions, TrackedFields, User,
};
use agora_infrastructure::{InMemoryStore, InMemoryVersionLog, ManualClock};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct RecordingActivity {
    events: Mutex<Vec<ActivityEvent>>,
}

impl RecordingActivity {
    pub fn types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }
}

impl ActivityLogger for RecordingActivity {
    fn log(&self, event: ActivityEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct World {
    pub store: Arc<InMemoryStore>,
    pub versions: Arc<InMemoryVersionLog>,
    pub clock: Arc<ManualClock>,
    pub activity: Arc<RecordingActivity>,
    pub discussions: DiscussionService,
    pub motions: MotionService,
    pub memberships: MembershipService,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

impl World {
    pub fn new() -> Self {
        Self::with_tracked_fields(TrackedFields::default())
    }

    pub fn with_tracked_fields(tracked_fields: TrackedFields) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let versions = Arc::new(InMemoryVersionLog::new());
        let clock = Arc::new(ManualClock::new(start()));
        let activity = Arc::new(RecordingActivity::default());

        Self {
            discussions: DiscussionService::new(store.clone(), versions.clone(), clock.clone())
                .with_tracked_fields(tracked_fields)
                .with_activity_logger(activity.clone()),
            motions: MotionService::new(store.clone(), clock.clone())
                .with_activity_logger(activity.clone()),
            memberships: MembershipService::new(store.clone(), clock.clone())
                .with_activity_logger(activity.clone()),
            store,
            versions,
            clock,
            activity,
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(Duration::minutes(minutes));
    }

    pub async fn user(&self, name: &str) -> User {
        self.memberships
            .register_user(NewUser::new(name, format!("{}@example.org", name)))
            .await
            .unwrap()
    }

    pub async fn group(&self, privacy: PrivacyOptions) -> Group {
        self.memberships
            .create_group(NewGroup::new("Council", privacy))
            .await
            .unwrap()
    }

    /// A group with `author` as its only member
    pub async fn group_with(&self, privacy: PrivacyOptions, author: &User) -> Group {
        let group = self.group(privacy).await;
        self.memberships.add_member(group.id, author.id).await.unwrap();
        group
    }

    pub async fn discussion(&self, group: &Group, author: &User, title: &str) -> Discussion {
        self.discussions
            .create(NewDiscussion::new(author.id, title).in_group(group.id))
            .await
            .unwrap()
    }
}
