//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod discussion;
pub mod issues;
pub mod reputation;
pub mod review;
pub mod users;

pub use discussion::{discuss, post_statement, search};
pub use issues::{create_issue, list_issues, lookup_issue};
pub use reputation::get_reputation;
pub use review::{cancel, flag, get_queue, overview, propose_edit, revoke, vote};
pub use users::{login, logout, register};
