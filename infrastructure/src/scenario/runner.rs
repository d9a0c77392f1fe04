//! Replays a [`Scenario`] through the services on fresh in-memory adapters.

use super::file::{Scenario, ScenarioError, Step};
use crate::audit::InMemoryVersionLog;
use crate::clock::ManualClock;
use crate::persistence::InMemoryStore;
use agora_application::ports::activity_log::{ActivityLogger, NoActivityLogger};
use agora_application::ports::clock::Clock;
use agora_application::{
    DestroyedDiscussion, DiscussionService, DiscussionSummary, MembershipService, MotionService,
    ServiceError,
};
use agora_domain::{
    CommentId, DiscussionChanges, DiscussionId, GroupId, MotionId, NewDiscussion, NewGroup,
    NewMotion, NewUser, NewVote, TrackedFields, UserId,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a replayed scenario
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutcome {
    pub steps_run: usize,
    /// Surviving discussions, in the order they were created
    pub discussions: Vec<(String, DiscussionSummary)>,
    pub destroyed: Vec<(String, DestroyedDiscussion)>,
    pub user_names: BTreeMap<UserId, String>,
}

/// Keys declared so far, per entity kind
#[derive(Default)]
struct Keys {
    users: HashMap<String, UserId>,
    groups: HashMap<String, GroupId>,
    discussions: Vec<(String, DiscussionId)>,
    /// Keys of destroyed discussions, never handed out again
    destroyed: HashSet<String>,
    comments: HashMap<String, CommentId>,
    motions: HashMap<String, MotionId>,
}

fn lookup<T: Copy>(
    map: &HashMap<String, T>,
    kind: &'static str,
    key: &str,
) -> Result<T, ScenarioError> {
    map.get(key).copied().ok_or_else(|| ScenarioError::UnknownKey {
        kind,
        key: key.to_string(),
    })
}

fn insert_unique<T>(
    map: &mut HashMap<String, T>,
    kind: &'static str,
    key: &str,
    value: T,
) -> Result<(), ScenarioError> {
    if map.contains_key(key) {
        return Err(ScenarioError::DuplicateKey {
            kind,
            key: key.to_string(),
        });
    }
    map.insert(key.to_string(), value);
    Ok(())
}

impl Keys {
    fn user(&self, key: &str) -> Result<UserId, ScenarioError> {
        lookup(&self.users, "user", key)
    }

    fn group(&self, key: &str) -> Result<GroupId, ScenarioError> {
        lookup(&self.groups, "group", key)
    }

    fn discussion(&self, key: &str) -> Result<DiscussionId, ScenarioError> {
        self.discussions
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, id)| *id)
            .ok_or_else(|| ScenarioError::UnknownKey {
                kind: "discussion",
                key: key.to_string(),
            })
    }

    fn optional_user(&self, key: Option<&String>) -> Result<Option<UserId>, ScenarioError> {
        key.map(|k| self.user(k)).transpose()
    }
}

pub struct ScenarioRunner {
    clock: Arc<ManualClock>,
    memberships: MembershipService,
    discussions: DiscussionService,
    motions: MotionService,
}

impl ScenarioRunner {
    /// Runner over an empty store, default tracked fields and no activity log
    pub fn in_memory() -> Self {
        Self::with_options(TrackedFields::default(), Arc::new(NoActivityLogger))
    }

    pub fn with_options(tracked_fields: TrackedFields, activity: Arc<dyn ActivityLogger>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let versions = Arc::new(InMemoryVersionLog::new());
        let clock = Arc::new(ManualClock::new(DateTime::<Utc>::UNIX_EPOCH));

        Self {
            memberships: MembershipService::new(store.clone(), clock.clone())
                .with_activity_logger(activity.clone()),
            discussions: DiscussionService::new(store.clone(), versions, clock.clone())
                .with_tracked_fields(tracked_fields)
                .with_activity_logger(activity.clone()),
            motions: MotionService::new(store, clock.clone()).with_activity_logger(activity),
            clock,
        }
    }

    pub fn discussions(&self) -> &DiscussionService {
        &self.discussions
    }

    pub fn motions(&self) -> &MotionService {
        &self.motions
    }

    pub fn memberships(&self) -> &MembershipService {
        &self.memberships
    }

    pub async fn run(&self, scenario: &Scenario) -> Result<ScenarioOutcome, ScenarioError> {
        self.clock.set(scenario.start);
        let mut keys = Keys::default();
        let mut outcome = ScenarioOutcome::default();

        self.setup(scenario, &mut keys, &mut outcome)
            .await
            .map_err(|e| match e {
                ReplayError::Scenario(e) => e,
                ReplayError::Service(e) => ScenarioError::Setup(e),
                ReplayError::TimeOutOfRange => ScenarioError::TimeOutOfRange { index: 0 },
            })?;

        for (index, step) in scenario.steps.iter().enumerate() {
            debug!("Step {}: {}", index, step.action());
            self.apply(step, &mut keys, &mut outcome)
                .await
                .map_err(|e| match e {
                    ReplayError::Scenario(e) => e,
                    ReplayError::Service(source) => ScenarioError::Step {
                        index,
                        action: step.action(),
                        source,
                    },
                    ReplayError::TimeOutOfRange => ScenarioError::TimeOutOfRange { index },
                })?;
            outcome.steps_run += 1;
        }

        for (key, id) in &keys.discussions {
            let summary = self
                .discussions
                .summarize(*id)
                .await
                .map_err(ScenarioError::Setup)?;
            outcome.discussions.push((key.clone(), summary));
        }

        info!(
            "Scenario replayed: {} step(s), {} discussion(s) left, {} destroyed",
            outcome.steps_run,
            outcome.discussions.len(),
            outcome.destroyed.len()
        );
        Ok(outcome)
    }

    async fn setup(
        &self,
        scenario: &Scenario,
        keys: &mut Keys,
        outcome: &mut ScenarioOutcome,
    ) -> Result<(), ReplayError> {
        for spec in &scenario.users {
            let user = self
                .memberships
                .register_user(NewUser::new(&spec.name, &spec.email))
                .await?;
            insert_unique(&mut keys.users, "user", &spec.key, user.id)?;
            outcome.user_names.insert(user.id, user.name);
        }

        for spec in &scenario.groups {
            let group = self
                .memberships
                .create_group(NewGroup::new(&spec.name, spec.privacy))
                .await?;
            insert_unique(&mut keys.groups, "group", &spec.key, group.id)?;

            for member in &spec.members {
                self.memberships.add_member(group.id, keys.user(member)?).await?;
            }
            for member in &spec.follow_by_default {
                self.memberships
                    .set_follow_by_default(group.id, keys.user(member)?, true)
                    .await?;
            }
        }
        Ok(())
    }

    async fn apply(
        &self,
        step: &Step,
        keys: &mut Keys,
        outcome: &mut ScenarioOutcome,
    ) -> Result<(), ReplayError> {
        match step {
            Step::Discuss {
                key,
                group,
                author,
                title,
                description,
                private,
            } => {
                if keys.destroyed.contains(key) || keys.discussions.iter().any(|(k, _)| k == key) {
                    return Err(ScenarioError::DuplicateKey {
                        kind: "discussion",
                        key: key.clone(),
                    }
                    .into());
                }
                let mut new =
                    NewDiscussion::new(keys.user(author)?, title).with_description(description);
                if let Some(group) = group {
                    new = new.in_group(keys.group(group)?);
                }
                if let Some(private) = private {
                    new = new.with_private(*private);
                }
                let discussion = self.discussions.create(new).await?;
                keys.discussions.push((key.clone(), discussion.id));
            }
            Step::Update {
                discussion,
                actor,
                title,
                description,
                private,
                author,
            } => {
                let mut changes = DiscussionChanges::new();
                if let Some(title) = title {
                    changes = changes.title(title);
                }
                if let Some(description) = description {
                    changes = changes.description(description);
                }
                if let Some(private) = private {
                    changes = changes.private(Some(*private));
                }
                if let Some(author) = author {
                    changes = changes.author(keys.user(author)?);
                }
                self.discussions
                    .update(
                        keys.discussion(discussion)?,
                        changes,
                        keys.optional_user(actor.as_ref())?,
                    )
                    .await?;
            }
            Step::Archive { discussion } => {
                self.discussions.archive(keys.discussion(discussion)?).await?;
            }
            Step::View { discussion, user } => {
                let id = keys.discussion(discussion)?;
                match keys.optional_user(user.as_ref())? {
                    Some(user) => {
                        self.discussions.viewed_by(id, user).await?;
                    }
                    None => {
                        self.discussions.viewed(id).await?;
                    }
                }
            }
            Step::Follow { discussion, user } => {
                self.discussions
                    .follow(keys.discussion(discussion)?, keys.user(user)?)
                    .await?;
            }
            Step::Unfollow { discussion, user } => {
                self.discussions
                    .unfollow(keys.discussion(discussion)?, keys.user(user)?)
                    .await?;
            }
            Step::Comment {
                key,
                discussion,
                author,
                body,
            } => {
                let comment = self
                    .discussions
                    .add_comment(keys.discussion(discussion)?, keys.user(author)?, body)
                    .await?;
                if let Some(key) = key {
                    insert_unique(&mut keys.comments, "comment", key, comment.id)?;
                }
            }
            Step::DeleteComment { comment } => {
                let id = lookup(&keys.comments, "comment", comment)?;
                self.discussions.delete_comment(id).await?;
            }
            Step::Motion {
                key,
                discussion,
                author,
                name,
                description,
                closes_in_minutes,
            } => {
                let mut new = NewMotion::new(keys.discussion(discussion)?, keys.user(author)?, name)
                    .with_description(description);
                if let Some(minutes) = closes_in_minutes {
                    new = new.closing_at(self.shifted(*minutes)?);
                }
                let motion = self.motions.create_motion(new).await?;
                insert_unique(&mut keys.motions, "motion", key, motion.id)?;
            }
            Step::CloseMotion { motion } => {
                self.motions
                    .close_motion(lookup(&keys.motions, "motion", motion)?)
                    .await?;
            }
            Step::DestroyMotion { motion } => {
                self.motions
                    .destroy_motion(lookup(&keys.motions, "motion", motion)?)
                    .await?;
            }
            Step::Vote {
                motion,
                user,
                position,
                statement,
            } => {
                let mut new = NewVote::new(
                    lookup(&keys.motions, "motion", motion)?,
                    keys.user(user)?,
                    *position,
                );
                if let Some(statement) = statement {
                    new = new.with_statement(statement);
                }
                self.motions.cast_vote(new).await?;
            }
            Step::Join { group, user } => {
                self.memberships
                    .add_member(keys.group(group)?, keys.user(user)?)
                    .await?;
            }
            Step::Leave { group, user } => {
                self.memberships
                    .remove_member(keys.group(group)?, keys.user(user)?)
                    .await?;
            }
            Step::Advance { minutes } => {
                self.clock.set(self.shifted(*minutes)?);
            }
            Step::Destroy { discussion } => {
                let id = keys.discussion(discussion)?;
                let destroyed = self.discussions.delayed_destroy(id).await?;
                keys.discussions.retain(|(_, d)| *d != id);
                keys.destroyed.insert(discussion.clone());
                outcome.destroyed.push((discussion.clone(), destroyed));
            }
        }
        Ok(())
    }

    /// The current time moved by `minutes`, if chrono can represent it
    fn shifted(&self, minutes: i64) -> Result<DateTime<Utc>, ReplayError> {
        Duration::try_minutes(minutes)
            .and_then(|by| self.clock.now().checked_add_signed(by))
            .ok_or(ReplayError::TimeOutOfRange)
    }
}

/// A replay failure before it is tied to a step index
enum ReplayError {
    Scenario(ScenarioError),
    Service(ServiceError),
    TimeOutOfRange,
}

impl From<ScenarioError> for ReplayError {
    fn from(e: ScenarioError) -> Self {
        ReplayError::Scenario(e)
    }
}

impl From<ServiceError> for ReplayError {
    fn from(e: ServiceError) -> Self {
        ReplayError::Service(e)
    }
}
