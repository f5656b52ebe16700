//! Review service
//!
//! Flag intake, edit proposals and the review queue state machine.
//!
//! Work on one statement (flags, edit proposals) is serialized by a lock on
//! the statement id; work on one review item (votes, cancel, revoke) by a lock
//! on the item id. When both are needed the statement lock is taken first.
//! These locks only cover one process. Across processes, every state change
//! is a conditional `transition_state` and only its winner applies effects.
//! Repositories additionally reject duplicate `(review, reviewer)` and
//! `(user, target)` rows.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::app::locks::KeyedLocks;
use crate::app::reputation_service::ReputationService;
use crate::app::review_config::ReviewConfig;
use crate::domain::entities::{
    tally_votes, FlagReason, NewFlagRecord, NewReviewItem, NewReviewVote, ReputationEventType,
    ReviewItem, ReviewItemId, ReviewKind, ReviewOutcome, ReviewQueue, ReviewState, ReviewVote,
    StatementId, User, UserId, VoteTally,
};
use crate::domain::ports::{
    FlagRepository, ReputationEventRepository, ReviewItemRepository, ReviewVoteRepository,
    StatementRepository, UserRepository,
};
use crate::error::{AppError, DomainError};

/// How many resolved items the history queue shows
const HISTORY_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStatus {
    Reported,
    AlreadyReported,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagResult {
    pub status: FlagStatus,
    pub review_id: Option<ReviewItemId>,
    /// Set when this flag's acknowledgement resolved an existing item
    pub outcome: Option<ReviewOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditStatus {
    Proposed,
    AlreadyProposed,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    pub status: EditStatus,
    pub review_id: ReviewItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    Recorded,
    AlreadyVoted,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResult {
    pub status: VoteStatus,
    pub review_id: ReviewItemId,
    pub state: ReviewState,
    pub outcome: Option<ReviewOutcome>,
    pub tally: VoteTally,
}

/// One queue as shown on the review overview
#[derive(Debug, Clone, Serialize)]
pub struct QueueSummary {
    pub queue: ReviewQueue,
    /// Items waiting for the caller's vote (all items for ongoing and history)
    pub count: i64,
    pub is_allowed: bool,
    pub reputation_needed: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOverview {
    pub reputation: i32,
    pub has_all_rights: bool,
    pub queues: Vec<QueueSummary>,
}

/// A review item together with its current statement text and tally
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    #[serde(flatten)]
    pub item: ReviewItem,
    pub statement_text: String,
    pub tally: VoteTally,
}

/// Service for flags, edit proposals and review voting
pub struct ReviewService<UR, SR, RIR, RVR, FR, RER>
where
    UR: UserRepository,
    SR: StatementRepository,
    RIR: ReviewItemRepository,
    RVR: ReviewVoteRepository,
    FR: FlagRepository,
    RER: ReputationEventRepository,
{
    statements: Arc<SR>,
    items: Arc<RIR>,
    votes: Arc<RVR>,
    flags: Arc<FR>,
    reputation: Arc<ReputationService<UR, RER>>,
    config: ReviewConfig,
    locks: KeyedLocks,
}

impl<UR, SR, RIR, RVR, FR, RER> ReviewService<UR, SR, RIR, RVR, FR, RER>
where
    UR: UserRepository,
    SR: StatementRepository,
    RIR: ReviewItemRepository,
    RVR: ReviewVoteRepository,
    FR: FlagRepository,
    RER: ReputationEventRepository,
{
    pub fn new(
        statements: Arc<SR>,
        items: Arc<RIR>,
        votes: Arc<RVR>,
        flags: Arc<FR>,
        reputation: Arc<ReputationService<UR, RER>>,
        config: ReviewConfig,
    ) -> Self {
        Self {
            statements,
            items,
            votes,
            flags,
            reputation,
            config,
            locks: KeyedLocks::new(),
        }
    }

    fn can_open(&self, user: &User, queue: ReviewQueue) -> bool {
        user.group.has_all_rights() || user.reputation >= self.config.borders.border_for(queue)
    }

    fn require_access(&self, user: &User, queue: ReviewQueue) -> Result<(), AppError> {
        if self.can_open(user, queue) {
            Ok(())
        } else {
            Err(AppError::Domain(DomainError::Forbidden(format!(
                "the {} queue needs {} reputation",
                queue,
                self.config.borders.border_for(queue)
            ))))
        }
    }

    fn require_admin(user: &User) -> Result<(), AppError> {
        if user.is_admin() {
            Ok(())
        } else {
            Err(AppError::Domain(DomainError::Unauthorized(
                "admin rights required".to_string(),
            )))
        }
    }

    async fn find_item(&self, id: &ReviewItemId) -> Result<ReviewItem, AppError> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review item not found: {}", id)))
    }

    // ========================================================================
    // Flag intake
    // ========================================================================

    /// Flag a statement.
    ///
    /// The first flag by a user on a statement either opens a new review item
    /// or, when another user's item of the same kind is pending, acknowledges
    /// it with a vote. Repeat flags are reported as `AlreadyReported`.
    pub async fn flag(
        &self,
        user: &User,
        target_id: &StatementId,
        reason: &str,
        duplicate_of: Option<StatementId>,
    ) -> Result<FlagResult, AppError> {
        let reason: FlagReason = reason
            .parse()
            .map_err(|e: String| AppError::Domain(DomainError::Validation(e)))?;
        let kind = reason.review_kind();

        let _statement_guard = self.locks.lock(target_id.0).await;

        let target = self
            .statements
            .find_by_id(target_id)
            .await?
            .filter(|s| !s.is_disabled)
            .ok_or_else(|| AppError::NotFound(format!("Statement not found: {}", target_id)))?;

        let duplicate_of = match (kind, duplicate_of) {
            (ReviewKind::Duplicate, None) => {
                return Err(AppError::Domain(DomainError::Validation(
                    "duplicate_of is required for duplicate flags".to_string(),
                )));
            }
            (ReviewKind::Duplicate, Some(original_id)) => {
                if original_id == target.id {
                    return Err(AppError::Domain(DomainError::Validation(
                        "a statement cannot duplicate itself".to_string(),
                    )));
                }
                let original = self
                    .statements
                    .find_by_id(&original_id)
                    .await?
                    .filter(|s| !s.is_disabled)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Statement not found: {}", original_id))
                    })?;
                if original.issue_id != target.issue_id {
                    return Err(AppError::Domain(DomainError::Validation(
                        "duplicate_of must belong to the same issue".to_string(),
                    )));
                }
                Some(original_id)
            }
            (_, _) => None,
        };

        if let Some(existing) = self
            .flags
            .find_by_user_and_target(&user.id, target_id)
            .await?
        {
            tracing::debug!(
                user_id = %user.id,
                statement_id = %target_id,
                review_id = %existing.review_id,
                "Statement already flagged by user"
            );
            return Ok(FlagResult {
                status: FlagStatus::AlreadyReported,
                review_id: Some(existing.review_id),
                outcome: None,
            });
        }

        let pending = self.items.find_pending_for_target(target_id, kind).await?;

        let (review_id, outcome) = match pending {
            Some(item) if item.detector_id == user.id => {
                return Ok(FlagResult {
                    status: FlagStatus::AlreadyReported,
                    review_id: Some(item.id),
                    outcome: None,
                });
            }
            Some(item) => {
                let _review_guard = self.locks.lock(item.id.0).await;
                // Re-read under the item lock, a concurrent vote may have resolved it
                let item = self.find_item(&item.id).await?;
                if item.is_pending() {
                    let result = self.record_vote(&item, &user.id, true).await?;
                    if result.status == VoteStatus::AlreadyVoted {
                        tracing::debug!(
                            user_id = %user.id,
                            review_id = %item.id,
                            "Flag on item the user already voted on"
                        );
                        return Ok(FlagResult {
                            status: FlagStatus::AlreadyReported,
                            review_id: Some(item.id),
                            outcome: None,
                        });
                    }
                    (item.id, result.outcome)
                } else {
                    (self.open_item(user, target_id, kind, reason, duplicate_of).await?, None)
                }
            }
            None => (
                self.open_item(user, target_id, kind, reason, duplicate_of)
                    .await?,
                None,
            ),
        };

        let record = NewFlagRecord {
            user_id: user.id,
            target_id: *target_id,
            reason,
            review_id,
        };
        match self.flags.create(&record).await {
            Ok(_) => {}
            Err(DomainError::AlreadyExists(_)) => {
                return Ok(FlagResult {
                    status: FlagStatus::AlreadyReported,
                    review_id: Some(review_id),
                    outcome: None,
                });
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            user_id = %user.id,
            statement_id = %target_id,
            review_id = %review_id,
            reason = %reason,
            "Statement flagged"
        );

        Ok(FlagResult {
            status: FlagStatus::Reported,
            review_id: Some(review_id),
            outcome,
        })
    }

    async fn open_item(
        &self,
        user: &User,
        target_id: &StatementId,
        kind: ReviewKind,
        reason: FlagReason,
        duplicate_of: Option<StatementId>,
    ) -> Result<ReviewItemId, AppError> {
        let item = self
            .items
            .create(&NewReviewItem {
                target_statement_id: *target_id,
                kind,
                detector_id: user.id,
                reason: Some(reason.to_string()),
                proposed_text: None,
                duplicate_of,
            })
            .await?;

        tracing::info!(
            review_id = %item.id,
            kind = %kind,
            statement_id = %target_id,
            "Review item opened"
        );

        Ok(item.id)
    }

    // ========================================================================
    // Edit proposals
    // ========================================================================

    /// Propose new text for a statement. The proposal is voted on like a flag.
    pub async fn propose_edit(
        &self,
        user: &User,
        statement_id: &StatementId,
        text: &str,
    ) -> Result<EditResult, AppError> {
        let _statement_guard = self.locks.lock(statement_id.0).await;

        let statement = self
            .statements
            .find_by_id(statement_id)
            .await?
            .filter(|s| !s.is_disabled)
            .ok_or_else(|| AppError::NotFound(format!("Statement not found: {}", statement_id)))?;

        if let Some(pending) = self
            .items
            .find_pending_for_target(statement_id, ReviewKind::Edit)
            .await?
        {
            tracing::debug!(
                statement_id = %statement_id,
                review_id = %pending.id,
                "Edit already pending"
            );
            return Ok(EditResult {
                status: EditStatus::AlreadyProposed,
                review_id: pending.id,
            });
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Domain(DomainError::Validation(
                "text must not be empty".to_string(),
            )));
        }
        if !statement.differs_from(text) {
            return Err(AppError::Domain(DomainError::Validation(
                "text is identical to the current statement".to_string(),
            )));
        }

        let item = self
            .items
            .create(&NewReviewItem {
                target_statement_id: *statement_id,
                kind: ReviewKind::Edit,
                detector_id: user.id,
                reason: None,
                proposed_text: Some(text.to_string()),
                duplicate_of: None,
            })
            .await?;

        tracing::info!(
            review_id = %item.id,
            statement_id = %statement_id,
            user_id = %user.id,
            "Edit proposed"
        );

        Ok(EditResult {
            status: EditStatus::Proposed,
            review_id: item.id,
        })
    }

    // ========================================================================
    // Voting
    // ========================================================================

    /// Cast a vote. `should_apply = true` acknowledges the item.
    pub async fn vote(
        &self,
        user: &User,
        review_id: &ReviewItemId,
        should_apply: bool,
    ) -> Result<VoteResult, AppError> {
        let _review_guard = self.locks.lock(review_id.0).await;

        let item = self.find_item(review_id).await?;
        self.require_access(user, item.kind.queue())?;

        self.record_vote(&item, &user.id, should_apply).await
    }

    /// Record a vote and resolve the item if the tally decides it.
    /// The caller holds the item lock.
    async fn record_vote(
        &self,
        item: &ReviewItem,
        reviewer_id: &UserId,
        is_okay: bool,
    ) -> Result<VoteResult, AppError> {
        if !item.is_pending() {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} is {}",
                item.id, item.state
            ))));
        }
        if item.detector_id == *reviewer_id {
            return Err(AppError::Domain(DomainError::Validation(
                "cannot vote on your own review item".to_string(),
            )));
        }

        let already_voted = self
            .votes
            .exists_for_review_and_reviewer(&item.id, reviewer_id)
            .await?
            || match self
                .votes
                .create(&NewReviewVote {
                    review_id: item.id,
                    reviewer_id: *reviewer_id,
                    is_okay,
                })
                .await
            {
                Ok(_) => false,
                Err(DomainError::AlreadyExists(_)) => true,
                Err(e) => return Err(e.into()),
            };

        let votes = self.votes.list_by_review(&item.id).await?;
        let tally = tally_votes(&votes);

        if already_voted {
            tracing::debug!(review_id = %item.id, user_id = %reviewer_id, "Vote already cast");
            return Ok(VoteResult {
                status: VoteStatus::AlreadyVoted,
                review_id: item.id,
                state: item.state,
                outcome: item.outcome,
                tally,
            });
        }

        tracing::info!(
            review_id = %item.id,
            user_id = %reviewer_id,
            is_okay = is_okay,
            ack = tally.ack,
            keep = tally.keep,
            "Vote recorded"
        );

        let (state, outcome) = match self.config.policy.evaluate(tally) {
            Some(outcome) => {
                if self.execute(item, outcome, &votes).await? {
                    (ReviewState::Executed, Some(outcome))
                } else {
                    let current = self.find_item(&item.id).await?;
                    (current.state, current.outcome)
                }
            }
            None => (ReviewState::Pending, None),
        };

        Ok(VoteResult {
            status: VoteStatus::Recorded,
            review_id: item.id,
            state,
            outcome,
            tally,
        })
    }

    /// Move an item to history, apply its effect and settle reputation.
    ///
    /// Returns `false` without side effects if another executor moved the
    /// item out of `Pending` first.
    async fn execute(
        &self,
        item: &ReviewItem,
        outcome: ReviewOutcome,
        votes: &[ReviewVote],
    ) -> Result<bool, AppError> {
        if !item.state.can_transition_to(ReviewState::Executed) {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} cannot be executed from {}",
                item.id, item.state
            ))));
        }

        let moved = self
            .items
            .transition_state(
                &item.id,
                ReviewState::Pending,
                ReviewState::Executed,
                Some(outcome),
            )
            .await?;
        if !moved {
            tracing::debug!(review_id = %item.id, "Review item already resolved elsewhere");
            return Ok(false);
        }

        if outcome == ReviewOutcome::Accepted {
            self.apply_effect(item).await?;
        }

        tracing::info!(
            review_id = %item.id,
            kind = %item.kind,
            outcome = %outcome,
            statement_id = %item.target_statement_id,
            "Review item executed"
        );

        let deltas = &self.config.deltas;
        let (delta, event_type) = match (item.kind, outcome) {
            (ReviewKind::Edit, ReviewOutcome::Accepted) => {
                (deltas.edit_accepted, ReputationEventType::EditAccepted)
            }
            (ReviewKind::Edit, ReviewOutcome::Rejected) => {
                (deltas.edit_rejected, ReputationEventType::EditRejected)
            }
            (_, ReviewOutcome::Accepted) => {
                (deltas.flag_accepted, ReputationEventType::FlagAccepted)
            }
            (_, ReviewOutcome::Rejected) => {
                (deltas.flag_rejected, ReputationEventType::FlagRejected)
            }
        };

        self.reputation
            .apply_reputation_change(
                &item.detector_id,
                delta,
                event_type,
                Some(item.id.0),
                Some(format!("{} review {}", item.kind, outcome)),
            )
            .await?;

        for vote in votes.iter().filter(|v| outcome.matches_vote(v.is_okay)) {
            self.reputation
                .apply_reputation_change(
                    &vote.reviewer_id,
                    deltas.review_contributed,
                    ReputationEventType::ReviewContributed,
                    Some(item.id.0),
                    Some(format!("voted with the {} {} review", outcome, item.kind)),
                )
                .await?;
        }

        Ok(true)
    }

    async fn apply_effect(&self, item: &ReviewItem) -> Result<(), AppError> {
        match item.kind {
            ReviewKind::Delete | ReviewKind::Duplicate => {
                self.statements
                    .set_disabled(&item.target_statement_id, true)
                    .await?;
                self.cancel_open_items_on(item).await?;
            }
            ReviewKind::Edit => {
                let Some(proposed) = item.proposed_text.as_deref() else {
                    return Err(AppError::Internal(format!(
                        "edit review {} has no proposed text",
                        item.id
                    )));
                };
                if let Some(current) = self
                    .statements
                    .find_by_id(&item.target_statement_id)
                    .await?
                {
                    self.items.set_previous_text(&item.id, &current.text).await?;
                }
                self.statements
                    .update_text(&item.target_statement_id, proposed)
                    .await?;
            }
            ReviewKind::Optimization => {}
        }
        Ok(())
    }

    /// A hidden statement cannot be voted on; withdraw whatever else is pending on it
    async fn cancel_open_items_on(&self, executed: &ReviewItem) -> Result<(), AppError> {
        let others = self
            .items
            .list_by_target(&executed.target_statement_id)
            .await?;

        for other in others
            .iter()
            .filter(|o| o.id != executed.id && o.is_pending())
        {
            if self
                .items
                .transition_state(&other.id, ReviewState::Pending, ReviewState::Canceled, None)
                .await?
            {
                tracing::info!(
                    review_id = %other.id,
                    statement_id = %executed.target_statement_id,
                    disabled_by = %executed.id,
                    "Review item canceled, statement disabled"
                );
            }
        }
        Ok(())
    }

    // ========================================================================
    // Admin operations
    // ========================================================================

    /// Withdraw a pending item without applying it (admin only)
    pub async fn cancel(&self, admin: &User, review_id: &ReviewItemId) -> Result<ReviewItem, AppError> {
        Self::require_admin(admin)?;
        let _review_guard = self.locks.lock(review_id.0).await;

        let item = self.find_item(review_id).await?;
        if !item.state.can_transition_to(ReviewState::Canceled) {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} is {} and cannot be canceled",
                item.id, item.state
            ))));
        }

        if !self
            .items
            .transition_state(review_id, ReviewState::Pending, ReviewState::Canceled, None)
            .await?
        {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} was resolved concurrently",
                review_id
            ))));
        }

        tracing::info!(review_id = %review_id, user_id = %admin.id, "Review item canceled");

        self.find_item(review_id).await
    }

    /// Undo an executed item's effect and reputation (admin only).
    ///
    /// An accepted edit can only be revoked while its text is still the
    /// statement's text. A disabled statement stays hidden while another
    /// accepted delete or duplicate review stands on it.
    pub async fn revoke(&self, admin: &User, review_id: &ReviewItemId) -> Result<ReviewItem, AppError> {
        Self::require_admin(admin)?;

        let target_id = self.find_item(review_id).await?.target_statement_id;
        let _statement_guard = self.locks.lock(target_id.0).await;
        let _review_guard = self.locks.lock(review_id.0).await;

        let item = self.find_item(review_id).await?;
        if !item.state.can_transition_to(ReviewState::Revoked) {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} is {} and cannot be revoked",
                item.id, item.state
            ))));
        }

        let accepted = item.outcome == Some(ReviewOutcome::Accepted);
        if accepted && item.kind == ReviewKind::Edit {
            let statement = self
                .statements
                .find_by_id(&item.target_statement_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Statement not found: {}", item.target_statement_id))
                })?;
            if item.proposed_text.as_deref() != Some(statement.text.as_str()) {
                return Err(AppError::Domain(DomainError::Conflict(format!(
                    "statement {} was changed after review {}; revoke the later edit first",
                    item.target_statement_id, item.id
                ))));
            }
        }

        if !self
            .items
            .transition_state(
                review_id,
                ReviewState::Executed,
                ReviewState::Revoked,
                item.outcome,
            )
            .await?
        {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "review item {} was revoked concurrently",
                review_id
            ))));
        }

        if accepted {
            match item.kind {
                ReviewKind::Delete | ReviewKind::Duplicate => {
                    let still_hidden = self
                        .items
                        .list_by_target(&item.target_statement_id)
                        .await?
                        .iter()
                        .any(|o| {
                            o.id != item.id
                                && o.kind.disables_target()
                                && o.state == ReviewState::Executed
                                && o.outcome == Some(ReviewOutcome::Accepted)
                        });
                    if still_hidden {
                        tracing::debug!(
                            review_id = %review_id,
                            statement_id = %item.target_statement_id,
                            "Statement stays disabled by another review"
                        );
                    } else {
                        self.statements
                            .set_disabled(&item.target_statement_id, false)
                            .await?;
                    }
                }
                ReviewKind::Edit => {
                    if let Some(previous) = item.previous_text.as_deref() {
                        self.statements
                            .update_text(&item.target_statement_id, previous)
                            .await?;
                    }
                }
                ReviewKind::Optimization => {}
            }
        }

        let reverted = self.reputation.revert_reference(item.id.0).await?;

        tracing::info!(
            review_id = %review_id,
            user_id = %admin.id,
            reverted_events = reverted.len(),
            "Review item revoked"
        );

        self.find_item(review_id).await
    }

    // ========================================================================
    // Queues
    // ========================================================================

    /// Pending items of `kind` the user may still vote on
    async fn open_for(&self, user: &User, kind: ReviewKind) -> Result<Vec<ReviewItem>, AppError> {
        let voted: HashSet<ReviewItemId> = self
            .votes
            .list_review_ids_by_reviewer(&user.id)
            .await?
            .into_iter()
            .collect();

        Ok(self
            .items
            .list_by_state(ReviewState::Pending, Some(kind))
            .await?
            .into_iter()
            .filter(|item| item.detector_id != user.id && !voted.contains(&item.id))
            .collect())
    }

    /// Per-queue counts and access flags for the caller
    pub async fn overview(&self, user: &User) -> Result<ReviewOverview, AppError> {
        let mut queues = Vec::with_capacity(ReviewQueue::ALL.len());

        for queue in ReviewQueue::ALL {
            let count = match queue.kind() {
                Some(kind) => self.open_for(user, kind).await?.len() as i64,
                None if queue == ReviewQueue::Ongoing => {
                    self.items.count_by_state(ReviewState::Pending).await?
                }
                None => {
                    let mut resolved = 0;
                    for state in [
                        ReviewState::Executed,
                        ReviewState::Canceled,
                        ReviewState::Revoked,
                    ] {
                        resolved += self.items.count_by_state(state).await?;
                    }
                    resolved
                }
            };

            queues.push(QueueSummary {
                queue,
                count,
                is_allowed: self.can_open(user, queue),
                reputation_needed: self.config.borders.border_for(queue),
            });
        }

        Ok(ReviewOverview {
            reputation: user.reputation,
            has_all_rights: user.group.has_all_rights(),
            queues,
        })
    }

    /// Items listed in a queue. Voting queues hide the caller's own items and
    /// items they already voted on.
    pub async fn queue(&self, user: &User, queue: ReviewQueue) -> Result<Vec<ReviewEntry>, AppError> {
        self.require_access(user, queue)?;

        let items = match queue.kind() {
            Some(kind) => self.open_for(user, kind).await?,
            None if queue == ReviewQueue::Ongoing => {
                self.items.list_by_state(ReviewState::Pending, None).await?
            }
            None => self.items.list_resolved(HISTORY_LIMIT).await?,
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let statement_text = self
                .statements
                .find_by_id(&item.target_statement_id)
                .await?
                .map(|s| s.text)
                .unwrap_or_default();
            let tally = tally_votes(&self.votes.list_by_review(&item.id).await?);
            entries.push(ReviewEntry {
                item,
                statement_text,
                tally,
            });
        }

        Ok(entries)
    }
}
