//! Discussion service
//!
//! Issues and the statements posted into them. Posting content feeds the
//! reputation ledger; search requests are forwarded to the search service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app::reputation_service::{ReputationChange, ReputationService};
use crate::app::review_config::ReputationDeltas;
use crate::domain::entities::{
    slugify, Issue, IssueLookup, NewIssue, NewStatement, ReputationEventType, Statement,
    StatementId, StatementKind, User,
};
use crate::domain::ports::{
    IssueRepository, ReputationEventRepository, SearchClient, SearchHit, SearchQuery,
    StatementRepository, UserRepository,
};
use crate::error::{AppError, DomainError};

/// Enabled statements of an issue
#[derive(Debug, Clone, Serialize)]
pub struct Discussion {
    pub issue: Issue,
    pub statements: Vec<Statement>,
}

/// A freshly posted statement and the reputation it earned
#[derive(Debug, Clone, Serialize)]
pub struct PostedStatement {
    pub statement: Statement,
    pub reputation: ReputationChange,
}

/// Which search service endpoint to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Statements,
    DuplicatesReasons,
    Edits,
    Suggestions,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "statements" => Ok(SearchMode::Statements),
            "duplicates_reasons" => Ok(SearchMode::DuplicatesReasons),
            "edits" => Ok(SearchMode::Edits),
            "suggestions" => Ok(SearchMode::Suggestions),
            _ => Err(format!("Unknown search mode: {}", s)),
        }
    }
}

/// Service for issues and statements
pub struct DiscussionService<IR, SR, UR, RER, SC>
where
    IR: IssueRepository,
    SR: StatementRepository,
    UR: UserRepository,
    RER: ReputationEventRepository,
    SC: SearchClient,
{
    issues: Arc<IR>,
    statements: Arc<SR>,
    reputation: Arc<ReputationService<UR, RER>>,
    search: Arc<SC>,
    deltas: ReputationDeltas,
}

impl<IR, SR, UR, RER, SC> DiscussionService<IR, SR, UR, RER, SC>
where
    IR: IssueRepository,
    SR: StatementRepository,
    UR: UserRepository,
    RER: ReputationEventRepository,
    SC: SearchClient,
{
    pub fn new(
        issues: Arc<IR>,
        statements: Arc<SR>,
        reputation: Arc<ReputationService<UR, RER>>,
        search: Arc<SC>,
        deltas: ReputationDeltas,
    ) -> Self {
        Self {
            issues,
            statements,
            reputation,
            search,
            deltas,
        }
    }

    pub async fn list_issues(&self) -> Result<Vec<Issue>, AppError> {
        Ok(self.issues.list().await?)
    }

    /// Fetch one issue by any combination of id, slug and title
    pub async fn lookup_issue(&self, lookup: &IssueLookup) -> Result<Issue, AppError> {
        if lookup.is_empty() {
            return Err(AppError::BadRequest(
                "one of uid, slug or title is required".to_string(),
            ));
        }

        let candidate = if let Some(uid) = lookup.uid {
            self.issues.find_by_id(&uid.into()).await?
        } else if let Some(slug) = lookup.slug.as_deref() {
            self.issues.find_by_slug(slug).await?
        } else {
            self.issues
                .list()
                .await?
                .into_iter()
                .find(|issue| lookup.matches(issue))
        };

        candidate
            .filter(|issue| lookup.matches(issue))
            .ok_or_else(|| AppError::NotFound("No issue matches the lookup".to_string()))
    }

    /// Create an issue (admin only)
    pub async fn create_issue(
        &self,
        user: &User,
        title: &str,
        info: &str,
    ) -> Result<Issue, AppError> {
        if !user.is_admin() {
            return Err(AppError::Domain(DomainError::Unauthorized(
                "admin rights required".to_string(),
            )));
        }

        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(AppError::BadRequest(
                "title must contain letters or digits".to_string(),
            ));
        }

        let issue = self
            .issues
            .create(&NewIssue {
                slug,
                title: title.to_string(),
                info: info.trim().to_string(),
            })
            .await?;

        tracing::info!(issue_id = %issue.id, slug = %issue.slug, "Issue created");

        Ok(issue)
    }

    async fn issue_by_slug(&self, slug: &str) -> Result<Issue, AppError> {
        self.issues
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Issue not found: {}", slug)))
    }

    /// Enabled statements of an issue, oldest first
    pub async fn discuss(&self, slug: &str) -> Result<Discussion, AppError> {
        let issue = self.issue_by_slug(slug).await?;
        let statements = self.statements.list_by_issue(&issue.id, false).await?;
        Ok(Discussion { issue, statements })
    }

    /// Post a statement. The author's first position earns the larger bonus.
    pub async fn post_statement(
        &self,
        author: &User,
        slug: &str,
        kind: StatementKind,
        text: &str,
    ) -> Result<PostedStatement, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest("text must not be empty".to_string()));
        }

        let issue = self.issue_by_slug(slug).await?;

        let is_first_position = kind == StatementKind::Position
            && self
                .statements
                .count_by_author_and_kind(&author.id, StatementKind::Position)
                .await?
                == 0;

        let statement = self
            .statements
            .create(&NewStatement {
                issue_id: issue.id,
                author_id: author.id,
                kind,
                text: text.to_string(),
            })
            .await?;

        tracing::info!(
            statement_id = %statement.id,
            issue_id = %issue.id,
            user_id = %author.id,
            kind = %kind,
            "Statement posted"
        );

        let (delta, event_type) = if is_first_position {
            (self.deltas.first_position, ReputationEventType::FirstPosition)
        } else {
            (self.deltas.new_statement, ReputationEventType::NewStatement)
        };

        let reputation = self
            .reputation
            .apply_reputation_change(
                &author.id,
                delta,
                event_type,
                Some(statement.id.0),
                Some(format!("{} posted in {}", kind, issue.slug)),
            )
            .await?;

        Ok(PostedStatement {
            statement,
            reputation,
        })
    }

    /// Forward a query to the search service
    pub async fn search(
        &self,
        slug: &str,
        mode: SearchMode,
        statement: Option<StatementId>,
        position: bool,
        value: &str,
    ) -> Result<Vec<SearchHit>, AppError> {
        let issue = self.issue_by_slug(slug).await?;
        let value = value.to_string();

        let require_statement = || {
            statement.ok_or_else(|| {
                AppError::BadRequest("statement is required for this search mode".to_string())
            })
        };

        let query = match mode {
            SearchMode::Statements => SearchQuery::Statements {
                issue: issue.id,
                value,
            },
            SearchMode::DuplicatesReasons => SearchQuery::DuplicateReasons {
                issue: issue.id,
                statement: require_statement()?,
                value,
            },
            SearchMode::Edits => SearchQuery::Edits {
                issue: issue.id,
                statement: require_statement()?,
                value,
            },
            SearchMode::Suggestions => SearchQuery::Suggestions {
                issue: issue.id,
                position,
                value,
            },
        };

        Ok(self.search.search(&query).await?)
    }
}
