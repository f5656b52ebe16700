//! Statement domain entity
//!
//! The atomic unit of user-contributed text within an issue: a position,
//! a premise or an argument. Statements are the targets of flags and edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::issue::IssueId;
use super::user::UserId;

/// Unique identifier for a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId(pub Uuid);

impl StatementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StatementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for StatementId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StatementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a statement in the discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Position,
    Premise,
    Argument,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Position => write!(f, "position"),
            StatementKind::Premise => write!(f, "premise"),
            StatementKind::Argument => write!(f, "argument"),
        }
    }
}

impl std::str::FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "position" => Ok(StatementKind::Position),
            "premise" => Ok(StatementKind::Premise),
            "argument" => Ok(StatementKind::Argument),
            _ => Err(format!("Unknown statement kind: {}", s)),
        }
    }
}

/// A piece of discussion content
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub id: StatementId,
    pub issue_id: IssueId,
    pub author_id: UserId,
    pub kind: StatementKind,
    pub text: String,
    /// Disabled statements are hidden from discussion listings
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Statement {
    /// Whether `text` would actually change this statement.
    /// Comparison ignores case and surrounding whitespace.
    pub fn differs_from(&self, text: &str) -> bool {
        self.text.trim().to_lowercase() != text.trim().to_lowercase()
    }
}

/// Data needed to create a new statement
#[derive(Debug, Clone)]
pub struct NewStatement {
    pub issue_id: IssueId,
    pub author_id: UserId,
    pub kind: StatementKind,
    pub text: String,
}
