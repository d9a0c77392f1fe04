//! Vote on a motion

use crate::core::ids::{MotionId, UserId, VoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position a member takes on a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Yes,
    Abstain,
    No,
    Block,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Yes => "yes",
            Position::Abstain => "abstain",
            Position::No => "no",
            Position::Block => "block",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "agree" => Ok(Position::Yes),
            "abstain" => Ok(Position::Abstain),
            "no" | "disagree" => Ok(Position::No),
            "block" => Ok(Position::Block),
            _ => Err(format!("Invalid vote position: {}", s)),
        }
    }
}

/// A member's vote on a motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub motion_id: MotionId,
    pub user_id: UserId,
    pub position: Position,
    pub statement: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attributes for a vote that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVote {
    pub motion_id: MotionId,
    pub user_id: UserId,
    pub position: Position,
    pub statement: Option<String>,
}

impl NewVote {
    pub fn new(motion_id: MotionId, user_id: UserId, position: Position) -> Self {
        Self {
            motion_id,
            user_id,
            position,
            statement: None,
        }
    }

    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn into_vote(self, id: VoteId, created_at: DateTime<Utc>) -> Vote {
        Vote {
            id,
            motion_id: self.motion_id,
            user_id: self.user_id,
            position: self.position,
            statement: self.statement,
            created_at,
        }
    }
}
