//! Issue domain entity
//!
//! An issue is a discussion topic. Statements are posted into exactly one issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(pub Uuid);

impl IssueId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IssueId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for IssueId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discussion topic
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub id: IssueId,
    pub slug: String,
    pub title: String,
    pub info: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new issue
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub slug: String,
    pub title: String,
    pub info: String,
}

/// Lookup criteria for a single issue. All given fields must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueLookup {
    pub uid: Option<Uuid>,
    pub slug: Option<String>,
    pub title: Option<String>,
}

impl IssueLookup {
    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.slug.is_none() && self.title.is_none()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.uid.map_or(true, |uid| issue.id.0 == uid)
            && self.slug.as_deref().map_or(true, |slug| issue.slug == slug)
            && self
                .title
                .as_deref()
                .map_or(true, |title| issue.title.eq_ignore_ascii_case(title))
    }
}

/// Build a URL slug from an issue title ("Cat or Dog" -> "cat-or-dog")
pub fn slugify(title: &str) -> String {
    let re = regex::Regex::new(r"[^a-z0-9]+").expect("static slug pattern");
    re.replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
