//! Review configuration
//!
//! Default vote thresholds, reputation deltas and queue access borders.
//! `Config::from_env` overrides every value from the environment.

use crate::domain::entities::{QuorumPolicy, ReviewQueue};

/// Vote margin that resolves a review item
pub const DEFAULT_QUORUM: u32 = 3;

/// Votes on one side that force a decision
pub const DEFAULT_MAX_VOTES: u32 = 5;

/// Reputation for the detector of an accepted flag
pub const REP_FLAG_ACCEPTED: i32 = 4;

/// Reputation for the detector of a rejected flag (negative)
pub const REP_FLAG_REJECTED: i32 = -2;

/// Reputation for the proposer of an accepted edit
pub const REP_EDIT_ACCEPTED: i32 = 3;

/// Reputation for the proposer of a rejected edit (negative)
pub const REP_EDIT_REJECTED: i32 = -1;

/// Reputation for every voter who sided with the final outcome
pub const REP_REVIEW_CONTRIBUTED: i32 = 1;

/// Reputation for the first position a user posts
pub const REP_FIRST_POSITION: i32 = 10;

/// Reputation for every further statement
pub const REP_NEW_STATEMENT: i32 = 1;

/// Reputation needed to open the deletes queue
pub const BORDER_DELETES: i32 = 30;

/// Reputation needed to open the optimizations queue
pub const BORDER_OPTIMIZATIONS: i32 = 30;

/// Reputation needed to open the edits queue
pub const BORDER_EDITS: i32 = 40;

/// Reputation needed to open the duplicates queue
pub const BORDER_DUPLICATES: i32 = 50;

/// Reputation needed to open the history
pub const BORDER_HISTORY: i32 = 150;

/// Reputation deltas applied by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationDeltas {
    pub flag_accepted: i32,
    pub flag_rejected: i32,
    pub edit_accepted: i32,
    pub edit_rejected: i32,
    pub review_contributed: i32,
    pub first_position: i32,
    pub new_statement: i32,
}

impl Default for ReputationDeltas {
    fn default() -> Self {
        Self {
            flag_accepted: REP_FLAG_ACCEPTED,
            flag_rejected: REP_FLAG_REJECTED,
            edit_accepted: REP_EDIT_ACCEPTED,
            edit_rejected: REP_EDIT_REJECTED,
            review_contributed: REP_REVIEW_CONTRIBUTED,
            first_position: REP_FIRST_POSITION,
            new_statement: REP_NEW_STATEMENT,
        }
    }
}

/// Minimum reputation per queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationBorders {
    pub deletes: i32,
    pub optimizations: i32,
    pub edits: i32,
    pub duplicates: i32,
    pub history: i32,
}

impl ReputationBorders {
    /// Reputation needed to open `queue`. Ongoing is open to everyone.
    pub fn border_for(&self, queue: ReviewQueue) -> i32 {
        match queue {
            ReviewQueue::Deletes => self.deletes,
            ReviewQueue::Optimizations => self.optimizations,
            ReviewQueue::Edits => self.edits,
            ReviewQueue::Duplicates => self.duplicates,
            ReviewQueue::History => self.history,
            ReviewQueue::Ongoing => 0,
        }
    }
}

impl Default for ReputationBorders {
    fn default() -> Self {
        Self {
            deletes: BORDER_DELETES,
            optimizations: BORDER_OPTIMIZATIONS,
            edits: BORDER_EDITS,
            duplicates: BORDER_DUPLICATES,
            history: BORDER_HISTORY,
        }
    }
}

/// Everything the review workflow reads from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewConfig {
    pub policy: QuorumPolicy,
    pub deltas: ReputationDeltas,
    pub borders: ReputationBorders,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            policy: QuorumPolicy {
                quorum: DEFAULT_QUORUM,
                max_votes: DEFAULT_MAX_VOTES,
            },
            deltas: ReputationDeltas::default(),
            borders: ReputationBorders::default(),
        }
    }
}
