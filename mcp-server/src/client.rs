//! HTTP client for the Dialog Review API
//!
//! Registration and login are not exposed here. Moderators log in once
//! through the API and hand the returned key to the MCP server.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use uuid::Uuid;

/// HTTP client for communicating with the Dialog Review API
#[derive(Clone)]
pub struct DialogClient {
    client: reqwest::Client,
    base_url: String,
}

impl DialogClient {
    /// Create a new client from environment variables
    ///
    /// Required env vars:
    /// - DIALOG_API_KEY: API key returned by /ajax_user_login (dr-...)
    ///
    /// Optional:
    /// - DIALOG_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DIALOG_API_KEY")
            .context("DIALOG_API_KEY not set. Log in via POST /ajax_user_login to get one.")?;
        let base_url = std::env::var("DIALOG_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url, &api_key)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pending counts per queue, access flags and own reputation
    pub async fn overview(&self) -> Result<String> {
        self.get_text("/review").await
    }

    /// Items in one review queue
    pub async fn queue(&self, queue: &str) -> Result<String> {
        self.get_text(&format!("/review/{}", queue_path(queue)?))
            .await
    }

    /// Flag a statement
    pub async fn flag(
        &self,
        statement_id: &str,
        reason: &str,
        duplicate_of: Option<&str>,
    ) -> Result<String> {
        self.post_text(
            "/review/flag",
            &FlagRequest {
                statement_id: parse_id(statement_id, "statement_id")?,
                reason: reason.to_string(),
                duplicate_of: duplicate_of
                    .map(|id| parse_id(id, "duplicate_of"))
                    .transpose()?,
            },
        )
        .await
    }

    /// Propose new text for a statement
    pub async fn propose_edit(&self, statement_id: &str, text: &str) -> Result<String> {
        self.post_text(
            "/review/edit",
            &EditRequest {
                statement_id: parse_id(statement_id, "statement_id")?,
                text: text.to_string(),
            },
        )
        .await
    }

    /// Vote on a review item
    pub async fn vote(&self, review_id: &str, should_apply: bool) -> Result<String> {
        let review_id = parse_id(review_id, "review_id")?;
        self.post_text(
            &format!("/review/{}/vote", review_id),
            &VoteRequest { should_apply },
        )
        .await
    }

    /// Reputation score and history of a user
    pub async fn reputation(&self, user_id: &str, limit: Option<u64>) -> Result<String> {
        let user_id = parse_id(user_id, "user_id")?;
        let path = match limit {
            Some(limit) => format!("/users/{}/reputation?limit={}", user_id, limit),
            None => format!("/users/{}/reputation", user_id),
        };
        self.get_text(&path).await
    }

    /// Enabled statements of an issue
    pub async fn discuss(&self, slug: &str) -> Result<String> {
        self.get_text(&format!("/discuss/{}", slug.trim())).await
    }

    // --- Internal helpers ---

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_text_response(response).await
    }

    async fn post_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_text_response(response).await
    }
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(body)
}

fn parse_id(value: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).with_context(|| format!("{} must be a UUID", field))
}

const QUEUES: [&str; 6] = [
    "deletes",
    "edits",
    "duplicates",
    "optimizations",
    "ongoing",
    "history",
];

fn queue_path(queue: &str) -> Result<String> {
    let queue = queue.trim().to_lowercase();
    if QUEUES.contains(&queue.as_str()) {
        Ok(queue)
    } else {
        anyhow::bail!("unknown queue '{}', expected one of {}", queue, QUEUES.join(", "))
    }
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct FlagRequest {
    statement_id: Uuid,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicate_of: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct EditRequest {
    statement_id: Uuid,
    text: String,
}

#[derive(Debug, Serialize)]
struct VoteRequest {
    should_apply: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = DialogClient::new("http://localhost:8080", "dr-test123").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DialogClient::new("http://localhost:8080/", "dr-test123").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_queue_path_normalizes_and_rejects() {
        assert_eq!(queue_path(" Deletes ").unwrap(), "deletes");
        assert!(queue_path("merges").is_err());
    }

    #[test]
    fn test_parse_id_names_field() {
        let err = parse_id("not-a-uuid", "review_id").unwrap_err();
        assert!(err.to_string().contains("review_id"));
    }

    #[test]
    fn test_flag_request_serialization() {
        let id = Uuid::new_v4();
        let req = FlagRequest {
            statement_id: id,
            reason: "spam".to_string(),
            duplicate_of: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(&format!(r#""statement_id":"{}""#, id)));
        assert!(json.contains(r#""reason":"spam""#));
        assert!(!json.contains("duplicate_of"));
    }

    #[test]
    fn test_vote_request_serialization() {
        let json = serde_json::to_string(&VoteRequest { should_apply: true }).unwrap();
        assert_eq!(json, r#"{"should_apply":true}"#);
    }
}
