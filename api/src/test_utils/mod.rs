//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories also back the router-level tests in
//! `integration_tests`, which build the app over them instead of Postgres.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
