//! Search client port trait
//!
//! Defines the interface for the external full-text search service that
//! suggests statements while users type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{IssueId, StatementId};
use crate::error::SearchError;

/// One query against the search service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Statements of an issue matching `value`
    Statements { issue: IssueId, value: String },
    /// Candidate originals when flagging `statement` as a duplicate
    DuplicateReasons {
        issue: IssueId,
        statement: StatementId,
        value: String,
    },
    /// Earlier edit proposals similar to `value`
    Edits {
        issue: IssueId,
        statement: StatementId,
        value: String,
    },
    /// Completions while typing a new statement; `position` selects
    /// positions instead of premises
    Suggestions {
        issue: IssueId,
        position: bool,
        value: String,
    },
}

/// A single hit returned by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    #[serde(default)]
    pub statement_uid: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError>;
}
