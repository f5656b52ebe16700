//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod search;

pub use repositories::{
    FlagRepository, IssueRepository, ReputationEventRepository, ReviewItemRepository,
    ReviewVoteRepository, StatementRepository, UserRepository,
};
pub use search::{SearchClient, SearchHit, SearchQuery};
