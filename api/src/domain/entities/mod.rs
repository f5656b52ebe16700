//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod flag;
pub mod issue;
pub mod reputation_event;
pub mod review_item;
pub mod review_vote;
pub mod statement;
pub mod user;

pub use flag::{FlagReason, FlagRecord, FlagRecordId, NewFlagRecord};
pub use issue::{slugify, Issue, IssueId, IssueLookup, NewIssue};
pub use reputation_event::{
    NewReputationEvent, ReputationEvent, ReputationEventId, ReputationEventType,
};
pub use review_item::{
    NewReviewItem, QuorumPolicy, ReviewItem, ReviewItemId, ReviewKind, ReviewOutcome,
    ReviewQueue, ReviewState, VoteTally,
};
pub use review_vote::{tally_votes, NewReviewVote, ReviewVote, ReviewVoteId};
pub use statement::{NewStatement, Statement, StatementId, StatementKind};
pub use user::{NewUser, User, UserGroup, UserId};
