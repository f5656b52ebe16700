//! Review item domain entity
//!
//! A review item is a pending moderation decision about one statement:
//! delete it, replace its text, mark it as a duplicate, or optimize it.
//! Items move through an explicit state machine and are resolved by the
//! tally of community votes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::statement::StatementId;
use super::user::UserId;

/// Unique identifier for a review item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewItemId(pub Uuid);

impl ReviewItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReviewItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReviewItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReviewItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an accepted review does to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    /// Disable the statement
    Delete,
    /// Replace the statement text with the proposed text
    Edit,
    /// Disable the statement in favour of `duplicate_of`
    Duplicate,
    /// Marks the statement for rework, no content effect
    Optimization,
}

impl ReviewKind {
    pub const ALL: [ReviewKind; 4] = [
        ReviewKind::Delete,
        ReviewKind::Edit,
        ReviewKind::Duplicate,
        ReviewKind::Optimization,
    ];

    /// The queue pending items of this kind are listed in
    pub fn queue(&self) -> ReviewQueue {
        match self {
            ReviewKind::Delete => ReviewQueue::Deletes,
            ReviewKind::Edit => ReviewQueue::Edits,
            ReviewKind::Duplicate => ReviewQueue::Duplicates,
            ReviewKind::Optimization => ReviewQueue::Optimizations,
        }
    }

    /// Whether accepting the item hides the target statement
    pub fn disables_target(&self) -> bool {
        matches!(self, ReviewKind::Delete | ReviewKind::Duplicate)
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewKind::Delete => write!(f, "delete"),
            ReviewKind::Edit => write!(f, "edit"),
            ReviewKind::Duplicate => write!(f, "duplicate"),
            ReviewKind::Optimization => write!(f, "optimization"),
        }
    }
}

impl std::str::FromStr for ReviewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delete" => Ok(ReviewKind::Delete),
            "edit" => Ok(ReviewKind::Edit),
            "duplicate" => Ok(ReviewKind::Duplicate),
            "optimization" => Ok(ReviewKind::Optimization),
            _ => Err(format!("Unknown review kind: {}", s)),
        }
    }
}

/// Named views over the review items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewQueue {
    Deletes,
    Edits,
    Duplicates,
    Optimizations,
    /// Read-only view of every pending item
    Ongoing,
    /// Every item in a terminal state
    History,
}

impl ReviewQueue {
    pub const ALL: [ReviewQueue; 6] = [
        ReviewQueue::Deletes,
        ReviewQueue::Edits,
        ReviewQueue::Duplicates,
        ReviewQueue::Optimizations,
        ReviewQueue::Ongoing,
        ReviewQueue::History,
    ];

    /// The review kind a voting queue holds; `None` for ongoing and history
    pub fn kind(&self) -> Option<ReviewKind> {
        match self {
            ReviewQueue::Deletes => Some(ReviewKind::Delete),
            ReviewQueue::Edits => Some(ReviewKind::Edit),
            ReviewQueue::Duplicates => Some(ReviewKind::Duplicate),
            ReviewQueue::Optimizations => Some(ReviewKind::Optimization),
            ReviewQueue::Ongoing | ReviewQueue::History => None,
        }
    }
}

impl std::fmt::Display for ReviewQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewQueue::Deletes => write!(f, "deletes"),
            ReviewQueue::Edits => write!(f, "edits"),
            ReviewQueue::Duplicates => write!(f, "duplicates"),
            ReviewQueue::Optimizations => write!(f, "optimizations"),
            ReviewQueue::Ongoing => write!(f, "ongoing"),
            ReviewQueue::History => write!(f, "history"),
        }
    }
}

impl std::str::FromStr for ReviewQueue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deletes" => Ok(ReviewQueue::Deletes),
            "edits" => Ok(ReviewQueue::Edits),
            "duplicates" => Ok(ReviewQueue::Duplicates),
            "optimizations" => Ok(ReviewQueue::Optimizations),
            "ongoing" => Ok(ReviewQueue::Ongoing),
            "history" => Ok(ReviewQueue::History),
            _ => Err(format!("Unknown review queue: {}", s)),
        }
    }
}

/// Lifecycle state of a review item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Pending,
    Executed,
    Canceled,
    Revoked,
}

impl ReviewState {
    /// Allowed transitions:
    /// - Pending -> Executed (vote tally reached)
    /// - Pending -> Canceled (admin)
    /// - Executed -> Revoked (admin, effect undone)
    pub fn can_transition_to(&self, next: ReviewState) -> bool {
        matches!(
            (self, next),
            (ReviewState::Pending, ReviewState::Executed)
                | (ReviewState::Pending, ReviewState::Canceled)
                | (ReviewState::Executed, ReviewState::Revoked)
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReviewState::Pending)
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewState::Pending => write!(f, "pending"),
            ReviewState::Executed => write!(f, "executed"),
            ReviewState::Canceled => write!(f, "canceled"),
            ReviewState::Revoked => write!(f, "revoked"),
        }
    }
}

impl std::str::FromStr for ReviewState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReviewState::Pending),
            "executed" => Ok(ReviewState::Executed),
            "canceled" => Ok(ReviewState::Canceled),
            "revoked" => Ok(ReviewState::Revoked),
            _ => Err(format!("Unknown review state: {}", s)),
        }
    }
}

/// Decision of an executed review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Accepted,
    Rejected,
}

impl ReviewOutcome {
    /// Whether a vote with `is_okay` agrees with this outcome
    pub fn matches_vote(&self, is_okay: bool) -> bool {
        match self {
            ReviewOutcome::Accepted => is_okay,
            ReviewOutcome::Rejected => !is_okay,
        }
    }
}

impl std::fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewOutcome::Accepted => write!(f, "accepted"),
            ReviewOutcome::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ReviewOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accepted" => Ok(ReviewOutcome::Accepted),
            "rejected" => Ok(ReviewOutcome::Rejected),
            _ => Err(format!("Unknown review outcome: {}", s)),
        }
    }
}

/// A moderation decision about one statement
#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub id: ReviewItemId,
    pub target_statement_id: StatementId,
    pub kind: ReviewKind,
    pub state: ReviewState,
    pub outcome: Option<ReviewOutcome>,
    /// User who filed the flag or proposal
    pub detector_id: UserId,
    /// Flag reason (`spam`, `offtopic`, ...); `None` for edit proposals
    pub reason: Option<String>,
    /// Replacement text for edit reviews
    pub proposed_text: Option<String>,
    /// Text of the statement before an accepted edit, kept for revocation
    pub previous_text: Option<String>,
    /// Original statement for duplicate reviews
    pub duplicate_of: Option<StatementId>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ReviewItem {
    pub fn is_pending(&self) -> bool {
        self.state == ReviewState::Pending
    }

    /// Whether the item is listed in `queue`
    pub fn is_in_queue(&self, queue: ReviewQueue) -> bool {
        match queue {
            ReviewQueue::Ongoing => self.is_pending(),
            ReviewQueue::History => self.state.is_terminal(),
            q => self.is_pending() && q.kind() == Some(self.kind),
        }
    }
}

/// Data needed to create a new review item
#[derive(Debug, Clone)]
pub struct NewReviewItem {
    pub target_statement_id: StatementId,
    pub kind: ReviewKind,
    pub detector_id: UserId,
    pub reason: Option<String>,
    pub proposed_text: Option<String>,
    pub duplicate_of: Option<StatementId>,
}

/// Acknowledge and keep counts of a review item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub ack: u32,
    pub keep: u32,
}

impl VoteTally {
    pub fn record(&mut self, is_okay: bool) {
        if is_okay {
            self.ack += 1;
        } else {
            self.keep += 1;
        }
    }
}

/// Vote thresholds that resolve a review item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumPolicy {
    /// Required margin between acknowledge and keep votes
    pub quorum: u32,
    /// Vote count on one side that forces a decision
    pub max_votes: u32,
}

impl QuorumPolicy {
    /// Decide an item from its current tally. `None` keeps it pending.
    pub fn evaluate(&self, tally: VoteTally) -> Option<ReviewOutcome> {
        if tally.ack >= tally.keep + self.quorum {
            Some(ReviewOutcome::Accepted)
        } else if tally.keep >= tally.ack + self.quorum {
            Some(ReviewOutcome::Rejected)
        } else if tally.ack.max(tally.keep) >= self.max_votes {
            if tally.ack > tally.keep {
                Some(ReviewOutcome::Accepted)
            } else {
                Some(ReviewOutcome::Rejected)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: QuorumPolicy = QuorumPolicy {
        quorum: 3,
        max_votes: 5,
    };

    fn tally(ack: u32, keep: u32) -> VoteTally {
        VoteTally { ack, keep }
    }

    fn item(kind: ReviewKind, state: ReviewState) -> ReviewItem {
        ReviewItem {
            id: ReviewItemId::new(),
            target_statement_id: StatementId::new(),
            kind,
            state,
            outcome: None,
            detector_id: UserId::new(),
            reason: None,
            proposed_text: None,
            previous_text: None,
            duplicate_of: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn tally_below_quorum_stays_pending() {
        assert_eq!(POLICY.evaluate(tally(0, 0)), None);
        assert_eq!(POLICY.evaluate(tally(2, 0)), None);
        assert_eq!(POLICY.evaluate(tally(3, 1)), None);
    }

    #[test]
    fn tally_ack_margin_accepts() {
        assert_eq!(POLICY.evaluate(tally(3, 0)), Some(ReviewOutcome::Accepted));
        assert_eq!(POLICY.evaluate(tally(4, 1)), Some(ReviewOutcome::Accepted));
    }

    #[test]
    fn tally_keep_margin_rejects() {
        assert_eq!(POLICY.evaluate(tally(0, 3)), Some(ReviewOutcome::Rejected));
        assert_eq!(POLICY.evaluate(tally(1, 4)), Some(ReviewOutcome::Rejected));
    }

    #[test]
    fn tally_max_votes_forces_decision() {
        assert_eq!(POLICY.evaluate(tally(5, 4)), Some(ReviewOutcome::Accepted));
        assert_eq!(POLICY.evaluate(tally(4, 5)), Some(ReviewOutcome::Rejected));
        assert_eq!(POLICY.evaluate(tally(5, 5)), Some(ReviewOutcome::Rejected));
    }

    #[test]
    fn quorum_of_two() {
        let policy = QuorumPolicy {
            quorum: 2,
            max_votes: 5,
        };
        assert_eq!(policy.evaluate(tally(1, 0)), None);
        assert_eq!(policy.evaluate(tally(2, 0)), Some(ReviewOutcome::Accepted));
    }

    #[test]
    fn vote_tally_record() {
        let mut t = VoteTally::default();
        t.record(true);
        t.record(true);
        t.record(false);
        assert_eq!(t, tally(2, 1));
    }

    #[test]
    fn state_transitions() {
        use ReviewState::*;
        assert!(Pending.can_transition_to(Executed));
        assert!(Pending.can_transition_to(Canceled));
        assert!(Executed.can_transition_to(Revoked));

        assert!(!Pending.can_transition_to(Revoked));
        assert!(!Executed.can_transition_to(Pending));
        assert!(!Executed.can_transition_to(Canceled));
        assert!(!Canceled.can_transition_to(Executed));
        assert!(!Revoked.can_transition_to(Executed));
        assert!(!Revoked.can_transition_to(Pending));
    }

    #[test]
    fn pending_item_is_in_kind_queue_and_ongoing() {
        let delete = item(ReviewKind::Delete, ReviewState::Pending);
        assert!(delete.is_in_queue(ReviewQueue::Deletes));
        assert!(delete.is_in_queue(ReviewQueue::Ongoing));
        assert!(!delete.is_in_queue(ReviewQueue::Edits));
        assert!(!delete.is_in_queue(ReviewQueue::History));
    }

    #[test]
    fn terminal_items_are_only_in_history() {
        for state in [
            ReviewState::Executed,
            ReviewState::Canceled,
            ReviewState::Revoked,
        ] {
            let edit = item(ReviewKind::Edit, state);
            assert!(edit.is_in_queue(ReviewQueue::History));
            assert!(!edit.is_in_queue(ReviewQueue::Edits));
            assert!(!edit.is_in_queue(ReviewQueue::Ongoing));
        }
    }

    #[test]
    fn queue_kind_mapping() {
        for kind in ReviewKind::ALL {
            assert_eq!(kind.queue().kind(), Some(kind));
        }
        assert_eq!(ReviewQueue::Ongoing.kind(), None);
        assert_eq!(ReviewQueue::History.kind(), None);
    }

    #[test]
    fn queue_from_str() {
        for queue in ReviewQueue::ALL {
            assert_eq!(queue.to_string().parse::<ReviewQueue>().unwrap(), queue);
        }
        assert!("merges".parse::<ReviewQueue>().is_err());
    }

    #[test]
    fn outcome_matches_vote() {
        assert!(ReviewOutcome::Accepted.matches_vote(true));
        assert!(!ReviewOutcome::Accepted.matches_vote(false));
        assert!(ReviewOutcome::Rejected.matches_vote(false));
    }

    #[test]
    fn disables_target() {
        assert!(ReviewKind::Delete.disables_target());
        assert!(ReviewKind::Duplicate.disables_target());
        assert!(!ReviewKind::Edit.disables_target());
        assert!(!ReviewKind::Optimization.disables_target());
    }
}
