//! SeaORM entities
//!
//! Table models for the PostgreSQL schema in `migrations/`.

pub mod flag_records;
pub mod issues;
pub mod reputation_events;
pub mod review_items;
pub mod review_votes;
pub mod statements;
pub mod users;
