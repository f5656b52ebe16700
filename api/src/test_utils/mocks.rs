//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They enforce the same uniqueness rules as the Postgres schema so services
//! see `AlreadyExists` where the database would reject a row.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    FlagRecord, FlagRecordId, Issue, IssueId, NewFlagRecord, NewIssue, NewReputationEvent,
    NewReviewItem, NewReviewVote, NewStatement, NewUser, ReputationEvent, ReputationEventId,
    ReviewItem, ReviewItemId, ReviewKind, ReviewOutcome, ReviewState, ReviewVote, ReviewVoteId,
    Statement, StatementId, StatementKind, User, UserId,
};
use crate::domain::ports::{
    FlagRepository, IssueRepository, ReputationEventRepository, ReviewItemRepository,
    ReviewVoteRepository, SearchClient, SearchHit, SearchQuery, StatementRepository,
    UserRepository,
};
use crate::error::{DomainError, SearchError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    fn update<F>(&self, id: &UserId, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("User {}", id)))?;
        f(user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.nickname == nickname)
            .cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.api_key_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.nickname == user.nickname) {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}'",
                user.nickname
            )));
        }

        let created = User {
            id: UserId::new(),
            nickname: user.nickname.clone(),
            public_nickname: user.public_nickname.clone(),
            password_hash: user.password_hash.clone(),
            api_key_hash: Some(user.api_key_hash.clone()),
            group: user.group,
            reputation: 0,
            created_at: Utc::now(),
            last_login_at: None,
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_api_key_hash(
        &self,
        id: &UserId,
        hash: Option<&str>,
    ) -> Result<(), DomainError> {
        self.update(id, |u| u.api_key_hash = hash.map(str::to_string))
    }

    async fn update_last_login(&self, id: &UserId) -> Result<(), DomainError> {
        self.update(id, |u| u.last_login_at = Some(Utc::now()))
    }

    async fn update_reputation(&self, id: &UserId, reputation: i32) -> Result<(), DomainError> {
        self.update(id, |u| u.reputation = reputation)
    }
}

// ============================================================================
// In-Memory Issue Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryIssueRepository {
    issues: Arc<RwLock<Vec<Issue>>>,
}

impl InMemoryIssueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(self, issue: Issue) -> Self {
        self.issues.write().unwrap().push(issue);
        self
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn list(&self) -> Result<Vec<Issue>, DomainError> {
        Ok(self.issues.read().unwrap().iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        Ok(self
            .issues
            .read()
            .unwrap()
            .iter()
            .find(|i| i.id == *id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Issue>, DomainError> {
        Ok(self
            .issues
            .read()
            .unwrap()
            .iter()
            .find(|i| i.slug == slug)
            .cloned())
    }

    async fn create(&self, issue: &NewIssue) -> Result<Issue, DomainError> {
        let mut issues = self.issues.write().unwrap();
        if issues.iter().any(|i| i.slug == issue.slug) {
            return Err(DomainError::AlreadyExists(format!("Issue '{}'", issue.slug)));
        }

        let created = Issue {
            id: IssueId::new(),
            slug: issue.slug.clone(),
            title: issue.title.clone(),
            info: issue.info.clone(),
            created_at: Utc::now(),
        };
        issues.push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// In-Memory Statement Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryStatementRepository {
    statements: Arc<RwLock<Vec<Statement>>>,
}

impl InMemoryStatementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(self, statement: Statement) -> Self {
        self.statements.write().unwrap().push(statement);
        self
    }

    fn update<F>(&self, id: &StatementId, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut Statement),
    {
        let mut statements = self.statements.write().unwrap();
        let statement = statements
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Statement {}", id)))?;
        f(statement);
        statement.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl StatementRepository for InMemoryStatementRepository {
    async fn find_by_id(&self, id: &StatementId) -> Result<Option<Statement>, DomainError> {
        Ok(self
            .statements
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn list_by_issue(
        &self,
        issue_id: &IssueId,
        include_disabled: bool,
    ) -> Result<Vec<Statement>, DomainError> {
        Ok(self
            .statements
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.issue_id == *issue_id && (include_disabled || !s.is_disabled))
            .cloned()
            .collect())
    }

    async fn create(&self, statement: &NewStatement) -> Result<Statement, DomainError> {
        let now = Utc::now();
        let created = Statement {
            id: StatementId::new(),
            issue_id: statement.issue_id,
            author_id: statement.author_id,
            kind: statement.kind,
            text: statement.text.clone(),
            is_disabled: false,
            created_at: now,
            updated_at: now,
        };
        self.statements.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn set_disabled(&self, id: &StatementId, disabled: bool) -> Result<(), DomainError> {
        self.update(id, |s| s.is_disabled = disabled)
    }

    async fn update_text(&self, id: &StatementId, text: &str) -> Result<(), DomainError> {
        self.update(id, |s| s.text = text.to_string())
    }

    async fn count_by_author_and_kind(
        &self,
        author_id: &UserId,
        kind: StatementKind,
    ) -> Result<i64, DomainError> {
        Ok(self
            .statements
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.author_id == *author_id && s.kind == kind)
            .count() as i64)
    }
}

// ============================================================================
// In-Memory Review Item Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReviewItemRepository {
    items: Arc<RwLock<Vec<ReviewItem>>>,
}

impl InMemoryReviewItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, item: ReviewItem) -> Self {
        self.items.write().unwrap().push(item);
        self
    }

    fn update<F>(&self, id: &ReviewItemId, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut ReviewItem),
    {
        let mut items = self.items.write().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Review item {}", id)))?;
        f(item);
        Ok(())
    }
}

#[async_trait]
impl ReviewItemRepository for InMemoryReviewItemRepository {
    async fn find_by_id(&self, id: &ReviewItemId) -> Result<Option<ReviewItem>, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .find(|i| i.id == *id)
            .cloned())
    }

    async fn create(&self, item: &NewReviewItem) -> Result<ReviewItem, DomainError> {
        let mut items = self.items.write().unwrap();
        if items.iter().any(|i| {
            i.is_pending() && i.target_statement_id == item.target_statement_id && i.kind == item.kind
        }) {
            return Err(DomainError::AlreadyExists(format!(
                "Pending {} review for statement {}",
                item.kind, item.target_statement_id
            )));
        }

        let created = ReviewItem {
            id: ReviewItemId::new(),
            target_statement_id: item.target_statement_id,
            kind: item.kind,
            state: ReviewState::Pending,
            outcome: None,
            detector_id: item.detector_id,
            reason: item.reason.clone(),
            proposed_text: item.proposed_text.clone(),
            previous_text: None,
            duplicate_of: item.duplicate_of,
            created_at: Utc::now(),
            resolved_at: None,
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn find_pending_for_target(
        &self,
        target_id: &StatementId,
        kind: ReviewKind,
    ) -> Result<Option<ReviewItem>, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .find(|i| i.is_pending() && i.target_statement_id == *target_id && i.kind == kind)
            .cloned())
    }

    async fn list_by_state(
        &self,
        state: ReviewState,
        kind: Option<ReviewKind>,
    ) -> Result<Vec<ReviewItem>, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.state == state && kind.map_or(true, |k| i.kind == k))
            .cloned()
            .collect())
    }

    async fn list_resolved(&self, limit: u64) -> Result<Vec<ReviewItem>, DomainError> {
        let mut resolved: Vec<_> = self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.state.is_terminal())
            .cloned()
            .collect();
        resolved.sort_by(|a, b| b.resolved_at.cmp(&a.resolved_at));
        resolved.truncate(limit as usize);
        Ok(resolved)
    }

    async fn count_by_state(&self, state: ReviewState) -> Result<i64, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.state == state)
            .count() as i64)
    }

    async fn list_by_target(
        &self,
        target_id: &StatementId,
    ) -> Result<Vec<ReviewItem>, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.target_statement_id == *target_id)
            .cloned()
            .collect())
    }

    async fn transition_state(
        &self,
        id: &ReviewItemId,
        from: ReviewState,
        to: ReviewState,
        outcome: Option<ReviewOutcome>,
    ) -> Result<bool, DomainError> {
        let mut items = self.items.write().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Review item {}", id)))?;
        if item.state != from {
            return Ok(false);
        }
        item.state = to;
        item.outcome = outcome;
        if from == ReviewState::Pending {
            item.resolved_at = Some(Utc::now());
        }
        Ok(true)
    }

    async fn set_previous_text(&self, id: &ReviewItemId, text: &str) -> Result<(), DomainError> {
        self.update(id, |i| i.previous_text = Some(text.to_string()))
    }
}

// ============================================================================
// In-Memory Review Vote Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReviewVoteRepository {
    votes: Arc<RwLock<Vec<ReviewVote>>>,
}

impl InMemoryReviewVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewVoteRepository for InMemoryReviewVoteRepository {
    async fn create(&self, vote: &NewReviewVote) -> Result<ReviewVote, DomainError> {
        let mut votes = self.votes.write().unwrap();
        if votes
            .iter()
            .any(|v| v.review_id == vote.review_id && v.reviewer_id == vote.reviewer_id)
        {
            return Err(DomainError::AlreadyExists(format!(
                "Vote by {} on {}",
                vote.reviewer_id, vote.review_id
            )));
        }

        let created = ReviewVote {
            id: ReviewVoteId::new(),
            review_id: vote.review_id,
            reviewer_id: vote.reviewer_id,
            is_okay: vote.is_okay,
            created_at: Utc::now(),
        };
        votes.push(created.clone());
        Ok(created)
    }

    async fn list_by_review(
        &self,
        review_id: &ReviewItemId,
    ) -> Result<Vec<ReviewVote>, DomainError> {
        Ok(self
            .votes
            .read()
            .unwrap()
            .iter()
            .filter(|v| v.review_id == *review_id)
            .cloned()
            .collect())
    }

    async fn exists_for_review_and_reviewer(
        &self,
        review_id: &ReviewItemId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .votes
            .read()
            .unwrap()
            .iter()
            .any(|v| v.review_id == *review_id && v.reviewer_id == *reviewer_id))
    }

    async fn list_review_ids_by_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> Result<Vec<ReviewItemId>, DomainError> {
        Ok(self
            .votes
            .read()
            .unwrap()
            .iter()
            .filter(|v| v.reviewer_id == *reviewer_id)
            .map(|v| v.review_id)
            .collect())
    }
}

// ============================================================================
// In-Memory Flag Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryFlagRepository {
    flags: Arc<RwLock<Vec<FlagRecord>>>,
}

impl InMemoryFlagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagRepository for InMemoryFlagRepository {
    async fn create(&self, flag: &NewFlagRecord) -> Result<FlagRecord, DomainError> {
        let mut flags = self.flags.write().unwrap();
        if flags
            .iter()
            .any(|f| f.user_id == flag.user_id && f.target_id == flag.target_id)
        {
            return Err(DomainError::AlreadyExists(format!(
                "Flag by {} on {}",
                flag.user_id, flag.target_id
            )));
        }

        let created = FlagRecord {
            id: FlagRecordId::new(),
            user_id: flag.user_id,
            target_id: flag.target_id,
            reason: flag.reason,
            review_id: flag.review_id,
            created_at: Utc::now(),
        };
        flags.push(created.clone());
        Ok(created)
    }

    async fn find_by_user_and_target(
        &self,
        user_id: &UserId,
        target_id: &StatementId,
    ) -> Result<Option<FlagRecord>, DomainError> {
        Ok(self
            .flags
            .read()
            .unwrap()
            .iter()
            .find(|f| f.user_id == *user_id && f.target_id == *target_id)
            .cloned())
    }
}

// ============================================================================
// In-Memory Reputation Event Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReputationEventRepository {
    events: Arc<RwLock<Vec<ReputationEvent>>>,
}

impl InMemoryReputationEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all events for inspection in tests
    pub fn get_all_events(&self) -> Vec<ReputationEvent> {
        self.events.read().unwrap().clone()
    }
}

#[async_trait]
impl ReputationEventRepository for InMemoryReputationEventRepository {
    async fn create(&self, event: &NewReputationEvent) -> Result<ReputationEvent, DomainError> {
        let created = ReputationEvent {
            id: ReputationEventId::new(),
            user_id: event.user_id,
            event_type: event.event_type,
            delta: event.delta,
            old_reputation: event.old_reputation,
            new_reputation: event.new_reputation,
            reference_id: event.reference_id,
            details: event.details.clone(),
            created_at: Utc::now(),
        };
        self.events.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReputationEvent>, DomainError> {
        // Insertion order is creation order; timestamps can tie within a test
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| e.user_id == *user_id)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_reference(
        &self,
        reference_id: Uuid,
    ) -> Result<Vec<ReputationEvent>, DomainError> {
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.reference_id == Some(reference_id))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Recording Search Client
// ============================================================================

/// Search client that records every query and answers with canned hits
#[derive(Default)]
pub struct RecordingSearchClient {
    queries: Arc<RwLock<Vec<SearchQuery>>>,
    hits: Arc<RwLock<Vec<SearchHit>>>,
}

impl RecordingSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(self, hits: Vec<SearchHit>) -> Self {
        *self.hits.write().unwrap() = hits;
        self
    }

    /// Queries received so far, in order
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for RecordingSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.write().unwrap().push(query.clone());
        Ok(self.hits.read().unwrap().clone())
    }
}
