//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    FlagRecord, Issue, IssueId, NewFlagRecord, NewIssue, NewReputationEvent, NewReviewItem,
    NewReviewVote, NewStatement, NewUser, ReputationEvent, ReviewItem, ReviewItemId, ReviewKind,
    ReviewOutcome, ReviewState, ReviewVote, Statement, StatementId, StatementKind, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by login nickname
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user. Fails with `AlreadyExists` if the nickname is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Replace (or clear, on logout) the API key hash
    async fn update_api_key_hash(&self, id: &UserId, hash: Option<&str>)
        -> Result<(), DomainError>;

    /// Update the last login timestamp
    async fn update_last_login(&self, id: &UserId) -> Result<(), DomainError>;

    /// Update reputation score
    async fn update_reputation(&self, id: &UserId, reputation: i32) -> Result<(), DomainError>;
}

/// Repository for Issue entities
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// List all issues, newest first
    async fn list(&self) -> Result<Vec<Issue>, DomainError>;

    /// Find an issue by ID
    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError>;

    /// Find an issue by URL slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Issue>, DomainError>;

    /// Create a new issue. Fails with `AlreadyExists` if the slug is taken.
    async fn create(&self, issue: &NewIssue) -> Result<Issue, DomainError>;
}

/// Repository for Statement entities
#[async_trait]
pub trait StatementRepository: Send + Sync {
    /// Find a statement by ID
    async fn find_by_id(&self, id: &StatementId) -> Result<Option<Statement>, DomainError>;

    /// List statements of an issue in posting order
    async fn list_by_issue(
        &self,
        issue_id: &IssueId,
        include_disabled: bool,
    ) -> Result<Vec<Statement>, DomainError>;

    /// Create a new statement
    async fn create(&self, statement: &NewStatement) -> Result<Statement, DomainError>;

    /// Hide or show a statement
    async fn set_disabled(&self, id: &StatementId, disabled: bool) -> Result<(), DomainError>;

    /// Replace the statement text
    async fn update_text(&self, id: &StatementId, text: &str) -> Result<(), DomainError>;

    /// Count statements of a given kind posted by a user
    async fn count_by_author_and_kind(
        &self,
        author_id: &UserId,
        kind: StatementKind,
    ) -> Result<i64, DomainError>;
}

/// Repository for ReviewItem entities
#[async_trait]
pub trait ReviewItemRepository: Send + Sync {
    /// Find a review item by ID
    async fn find_by_id(&self, id: &ReviewItemId) -> Result<Option<ReviewItem>, DomainError>;

    /// Create a new pending review item
    async fn create(&self, item: &NewReviewItem) -> Result<ReviewItem, DomainError>;

    /// Find the pending item of a kind for a statement, if any
    async fn find_pending_for_target(
        &self,
        target_id: &StatementId,
        kind: ReviewKind,
    ) -> Result<Option<ReviewItem>, DomainError>;

    /// List items in a given state, oldest first. `kind` narrows the list.
    async fn list_by_state(
        &self,
        state: ReviewState,
        kind: Option<ReviewKind>,
    ) -> Result<Vec<ReviewItem>, DomainError>;

    /// List items in any terminal state, most recently resolved first
    async fn list_resolved(&self, limit: u64) -> Result<Vec<ReviewItem>, DomainError>;

    /// Count items in a given state
    async fn count_by_state(&self, state: ReviewState) -> Result<i64, DomainError>;

    /// Every item ever opened on a statement, any state
    async fn list_by_target(&self, target_id: &StatementId)
        -> Result<Vec<ReviewItem>, DomainError>;

    /// Move an item from `from` to `to`, only if it is still in `from`.
    ///
    /// Returns `false` when the item was already moved by someone else; the
    /// row is left untouched in that case. Leaving `Pending` stamps
    /// `resolved_at`; later transitions keep the original stamp.
    async fn transition_state(
        &self,
        id: &ReviewItemId,
        from: ReviewState,
        to: ReviewState,
        outcome: Option<ReviewOutcome>,
    ) -> Result<bool, DomainError>;

    /// Remember the statement text an accepted edit replaced
    async fn set_previous_text(&self, id: &ReviewItemId, text: &str) -> Result<(), DomainError>;
}

/// Repository for ReviewVote entities
#[async_trait]
pub trait ReviewVoteRepository: Send + Sync {
    /// Record a vote. Fails with `AlreadyExists` if the reviewer already voted.
    async fn create(&self, vote: &NewReviewVote) -> Result<ReviewVote, DomainError>;

    /// List all votes on an item
    async fn list_by_review(&self, review_id: &ReviewItemId)
        -> Result<Vec<ReviewVote>, DomainError>;

    /// Check whether a reviewer has voted on an item
    async fn exists_for_review_and_reviewer(
        &self,
        review_id: &ReviewItemId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// IDs of every item a reviewer has voted on
    async fn list_review_ids_by_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> Result<Vec<ReviewItemId>, DomainError>;
}

/// Repository for FlagRecord entities
#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Record a flag. Fails with `AlreadyExists` if the user already flagged the target.
    async fn create(&self, flag: &NewFlagRecord) -> Result<FlagRecord, DomainError>;

    /// Find the flag a user placed on a target
    async fn find_by_user_and_target(
        &self,
        user_id: &UserId,
        target_id: &StatementId,
    ) -> Result<Option<FlagRecord>, DomainError>;
}

/// Repository for ReputationEvent entities (audit trail)
#[async_trait]
pub trait ReputationEventRepository: Send + Sync {
    /// Create a new reputation event
    async fn create(&self, event: &NewReputationEvent) -> Result<ReputationEvent, DomainError>;

    /// Find reputation events for a user, newest first
    async fn find_by_user(
        &self,
        user_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ReputationEvent>, DomainError>;

    /// Find every event caused by a given review item or statement
    async fn find_by_reference(&self, reference_id: Uuid)
        -> Result<Vec<ReputationEvent>, DomainError>;
}
