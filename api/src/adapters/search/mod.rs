//! Search service adapter
//!
//! Path builders and HTTP client for the external statement search service.

pub mod client;
pub mod routes;

pub use client::{ConfiguredSearchClient, HttpSearchClient, NoopSearchClient};
