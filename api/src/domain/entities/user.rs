//! User domain entity
//!
//! Represents a participant of the discussion platform. Users post statements,
//! flag content and vote in the review queues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permission group of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGroup {
    Admin,
    Author,
    User,
}

impl UserGroup {
    /// Admins and authors may open every review queue regardless of reputation
    pub fn has_all_rights(&self) -> bool {
        matches!(self, UserGroup::Admin | UserGroup::Author)
    }
}

impl std::fmt::Display for UserGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserGroup::Admin => write!(f, "admin"),
            UserGroup::Author => write!(f, "author"),
            UserGroup::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserGroup::Admin),
            "author" => Ok(UserGroup::Author),
            "user" => Ok(UserGroup::User),
            _ => Err(format!("Unknown user group: {}", s)),
        }
    }
}

/// A registered participant
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub public_nickname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub api_key_hash: Option<String>,
    pub group: UserGroup,
    pub reputation: i32,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.group == UserGroup::Admin
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nickname: String,
    pub public_nickname: String,
    pub password_hash: String,
    pub api_key_hash: String,
    pub group: UserGroup,
}
