//! Ghost MCP Server
//!
//! Model Context Protocol server exposing Ghost CMS administration
//! (posts, pages, members, tags, authors, image uploads) to LLM agents
//! over stdio.

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use ghost_client::{GhostClient, GhostConfig};
use ghost_mcp::server::GhostMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ghost_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = GhostConfig::from_env()?;
    let client = GhostClient::new(&config)?;

    tracing::info!("ghost-mcp starting (stdio transport)");

    let server = GhostMcpServer::new(client);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
