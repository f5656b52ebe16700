//! Flag domain entity
//!
//! A flag is a user's report that a statement is problematic. Each user may
//! flag a given statement once; the record links the flag to the review item
//! it created or acknowledged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::review_item::{ReviewItemId, ReviewKind};
use super::statement::StatementId;
use super::user::UserId;

/// Unique identifier for a flag record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagRecordId(pub Uuid);

impl FlagRecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FlagRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for FlagRecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FlagRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a statement was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagReason {
    Offtopic,
    Spam,
    Harmful,
    Optimization,
    Duplicate,
}

impl FlagReason {
    /// Kind of review item this reason opens
    pub fn review_kind(&self) -> ReviewKind {
        match self {
            FlagReason::Offtopic | FlagReason::Spam | FlagReason::Harmful => ReviewKind::Delete,
            FlagReason::Optimization => ReviewKind::Optimization,
            FlagReason::Duplicate => ReviewKind::Duplicate,
        }
    }
}

impl std::fmt::Display for FlagReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagReason::Offtopic => write!(f, "offtopic"),
            FlagReason::Spam => write!(f, "spam"),
            FlagReason::Harmful => write!(f, "harmful"),
            FlagReason::Optimization => write!(f, "optimization"),
            FlagReason::Duplicate => write!(f, "duplicate"),
        }
    }
}

impl std::str::FromStr for FlagReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offtopic" => Ok(FlagReason::Offtopic),
            "spam" => Ok(FlagReason::Spam),
            "harmful" => Ok(FlagReason::Harmful),
            "optimization" => Ok(FlagReason::Optimization),
            "duplicate" => Ok(FlagReason::Duplicate),
            _ => Err(format!("Unknown flag reason: {}", s)),
        }
    }
}

/// A user's flag on a statement
#[derive(Debug, Clone, Serialize)]
pub struct FlagRecord {
    pub id: FlagRecordId,
    pub user_id: UserId,
    pub target_id: StatementId,
    pub reason: FlagReason,
    pub review_id: ReviewItemId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFlagRecord {
    pub user_id: UserId,
    pub target_id: StatementId,
    pub reason: FlagReason,
    pub review_id: ReviewItemId,
}
