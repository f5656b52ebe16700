//! Review vote domain entity
//!
//! One vote of one reviewer on one review item. `is_okay = true` acknowledges
//! the flag or proposal, `false` votes to keep the statement as it is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::review_item::{ReviewItemId, VoteTally};
use super::user::UserId;

/// Unique identifier for a review vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewVoteId(pub Uuid);

impl ReviewVoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReviewVoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReviewVoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReviewVoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewVote {
    pub id: ReviewVoteId,
    pub review_id: ReviewItemId,
    pub reviewer_id: UserId,
    pub is_okay: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReviewVote {
    pub review_id: ReviewItemId,
    pub reviewer_id: UserId,
    pub is_okay: bool,
}

/// Count acknowledge and keep votes
pub fn tally_votes(votes: &[ReviewVote]) -> VoteTally {
    votes.iter().fold(VoteTally::default(), |mut tally, vote| {
        tally.record(vote.is_okay);
        tally
    })
}
