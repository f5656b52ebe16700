//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod flag_repo;
pub mod issue_repo;
pub mod reputation_event_repo;
pub mod review_item_repo;
pub mod review_vote_repo;
pub mod statement_repo;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use flag_repo::PostgresFlagRepository;
pub use issue_repo::PostgresIssueRepository;
pub use reputation_event_repo::PostgresReputationEventRepository;
pub use review_item_repo::PostgresReviewItemRepository;
pub use review_vote_repo::PostgresReviewVoteRepository;
pub use statement_repo::PostgresStatementRepository;
pub use user_repo::PostgresUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Map an insert failure, turning unique-index violations into `AlreadyExists`
pub(crate) fn insert_error(e: DbErr, what: impl Into<String>) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(what.into()),
        _ => DomainError::Database(e.to_string()),
    }
}

/// Map an update failure, turning a missing row into `NotFound`
pub(crate) fn update_error(e: DbErr, what: impl Into<String>) -> DomainError {
    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => DomainError::NotFound(what.into()),
        e => DomainError::Database(e.to_string()),
    }
}
