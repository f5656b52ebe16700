//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod search;

pub use postgres::{
    PostgresFlagRepository, PostgresIssueRepository, PostgresReputationEventRepository,
    PostgresReviewItemRepository, PostgresReviewVoteRepository, PostgresStatementRepository,
    PostgresUserRepository,
};
pub use search::ConfiguredSearchClient;
