//! Dialog Review MCP Server implementation
//!
//! Wraps the review endpoints of the HTTP API as tools for moderators.

use crate::client::DialogClient;
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

const HELP_TEXT: &str = r#"Dialog Review - community moderation

QUEUES:
- deletes, duplicates, optimizations: flagged statements waiting for votes
- edits: proposed rewrites waiting for votes
- ongoing: everything still pending
- history: decided, canceled and revoked items
Each queue needs a minimum reputation; 'overview' shows which ones you can open.

WORKFLOW:
1. 'overview' - see how many items wait for you in each queue
2. 'queue' - list the items of one queue
3. 'vote' - should_apply=true agrees with the flag or edit, false keeps the statement
4. 'flag' / 'propose_edit' - report or improve a statement you found via 'discuss'

REPUTATION:
- Accepted flags and edits reward the detector, rejected ones cost points
- Voting with the final outcome earns a point
- 'reputation' shows a user's score and audit trail"#;

/// Dialog Review MCP Server
#[derive(Clone)]
pub struct DialogReviewServer {
    client: DialogClient,
    tool_router: ToolRouter<Self>,
}

impl DialogReviewServer {
    pub fn from_env() -> Result<Self> {
        let client = DialogClient::from_env()?;
        Ok(Self {
            client,
            tool_router: Self::tool_router(),
        })
    }

    #[cfg(test)]
    #[allow(dead_code)]
    pub fn new(client: DialogClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_result(response: Result<String>) -> Result<CallToolResult, McpError> {
    match response {
        Ok(body) => Ok(CallToolResult::success(vec![Content::text(body)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueueParams {
    /// Queue name: "deletes", "edits", "duplicates", "optimizations", "ongoing" or "history"
    pub queue: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FlagParams {
    /// UUID of the statement to flag
    pub statement_id: String,
    /// Reason: "offtopic", "spam", "harmful", "optimization" or "duplicate"
    pub reason: String,
    /// UUID of the original statement, required for "duplicate"
    #[serde(default)]
    pub duplicate_of: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProposeEditParams {
    /// UUID of the statement to rewrite
    pub statement_id: String,
    /// The proposed new text
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VoteParams {
    /// UUID of the review item
    pub review_id: String,
    /// true to apply the flag or edit, false to keep the statement unchanged
    pub should_apply: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReputationParams {
    /// UUID of the user
    pub user_id: String,
    /// Maximum number of history entries (default 50)
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DiscussParams {
    /// Issue slug, e.g. "cat-or-dog"
    pub slug: String,
}

#[tool_router]
impl DialogReviewServer {
    // === Queues ===

    #[tool(
        description = "Show pending item counts per review queue, which queues you may open, and your reputation. Call this first."
    )]
    async fn overview(&self) -> Result<CallToolResult, McpError> {
        to_result(self.client.overview().await)
    }

    #[tool(description = "List the items of one review queue with their statement text and vote tally.")]
    async fn queue(&self, params: Parameters<QueueParams>) -> Result<CallToolResult, McpError> {
        to_result(self.client.queue(&params.0.queue).await)
    }

    // === Reporting ===

    #[tool(
        description = "Flag a statement as offtopic, spam, harmful, needing optimization, or a duplicate of another statement."
    )]
    async fn flag(&self, params: Parameters<FlagParams>) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .flag(
                    &params.0.statement_id,
                    &params.0.reason,
                    params.0.duplicate_of.as_deref(),
                )
                .await,
        )
    }

    #[tool(description = "Propose new text for a statement. Other users vote on the proposal.")]
    async fn propose_edit(
        &self,
        params: Parameters<ProposeEditParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .propose_edit(&params.0.statement_id, &params.0.text)
                .await,
        )
    }

    // === Voting ===

    #[tool(
        description = "Vote on a review item. should_apply=true agrees with the flag or edit, false keeps the statement."
    )]
    async fn vote(&self, params: Parameters<VoteParams>) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .vote(&params.0.review_id, params.0.should_apply)
                .await,
        )
    }

    // === Reading ===

    #[tool(description = "Show a user's reputation and the events that changed it, newest first.")]
    async fn reputation(
        &self,
        params: Parameters<ReputationParams>,
    ) -> Result<CallToolResult, McpError> {
        to_result(
            self.client
                .reputation(&params.0.user_id, params.0.limit)
                .await,
        )
    }

    #[tool(description = "Show the enabled statements of an issue, including their UUIDs.")]
    async fn discuss(&self, params: Parameters<DiscussParams>) -> Result<CallToolResult, McpError> {
        to_result(self.client.discuss(&params.0.slug).await)
    }

    // === Help ===

    #[tool(description = "Explain the review queues, voting and reputation.")]
    async fn help(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(HELP_TEXT)]))
    }
}

#[tool_handler]
impl ServerHandler for DialogReviewServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dialog-review".into(),
                title: Some("Dialog Review MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(HELP_TEXT.into()),
        }
    }
}
