//! Query paths understood by the search service
//!
//! Every path is relative to the service's base URL. The search value is
//! URL-encoded; ids are rendered as-is.

use urlencoding::encode;

use crate::domain::entities::{IssueId, StatementId};
use crate::domain::ports::SearchQuery;

/// `/statements?id={issue}&search={value}`
pub fn statements_path(issue: &IssueId, value: &str) -> String {
    format!("/statements?id={}&search={}", issue, encode(value))
}

/// `/duplicates_reasons?id={issue}&statement_uid={statement}&search={value}`
pub fn duplicates_reasons_path(issue: &IssueId, statement: &StatementId, value: &str) -> String {
    format!(
        "/duplicates_reasons?id={}&statement_uid={}&search={}",
        issue,
        statement,
        encode(value)
    )
}

/// `/edits?id={issue}&statement_uid={statement}&search={value}`
pub fn edits_path(issue: &IssueId, statement: &StatementId, value: &str) -> String {
    format!(
        "/edits?id={}&statement_uid={}&search={}",
        issue,
        statement,
        encode(value)
    )
}

/// `/suggestions?id={issue}&start={position}&search={value}`
pub fn suggestions_path(issue: &IssueId, position: bool, value: &str) -> String {
    format!(
        "/suggestions?id={}&start={}&search={}",
        issue,
        position,
        encode(value)
    )
}

impl SearchQuery {
    /// Path of this query relative to the search base URL
    pub fn path(&self) -> String {
        match self {
            SearchQuery::Statements { issue, value } => statements_path(issue, value),
            SearchQuery::DuplicateReasons {
                issue,
                statement,
                value,
            } => duplicates_reasons_path(issue, statement, value),
            SearchQuery::Edits {
                issue,
                statement,
                value,
            } => edits_path(issue, statement, value),
            SearchQuery::Suggestions {
                issue,
                position,
                value,
            } => suggestions_path(issue, *position, value),
        }
    }
}
