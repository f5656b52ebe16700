//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod discussion_service;
pub mod locks;
pub mod reputation_service;
pub mod review_config;
pub mod review_service;
pub mod user_service;

pub use discussion_service::{Discussion, DiscussionService, PostedStatement, SearchMode};
pub use reputation_service::{ReputationChange, ReputationHistory, ReputationService};
// Re-export review config for public API (constants used by consumers)
#[allow(unused_imports)]
pub use review_config::*;
pub use review_service::{
    EditResult, FlagResult, ReviewEntry, ReviewOverview, ReviewService, VoteResult,
};
pub use user_service::{hash_api_key, UserService};
