//! Dialog Review MCP Server
//!
//! This MCP server lets moderators work the review queues from an MCP client.
//! It authenticates with an API key from the environment and exposes tools for:
//! - Viewing queue counts and queue contents
//! - Flagging statements and proposing edits
//! - Voting on review items
//! - Reading discussions and reputation

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::DialogReviewServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Dialog Review MCP server");

    let server = DialogReviewServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
