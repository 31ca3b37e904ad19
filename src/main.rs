//! zammad-mcp - MCP server for the Zammad helpdesk
//!
//! This binary runs as an MCP server using stdio transport.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `ZAMMAD_BASE_URL`: Base URL of your Zammad instance
//! - `ZAMMAD_TOKEN`: API access token, or
//! - `ZAMMAD_USERNAME` / `ZAMMAD_PASSWORD`: basic authentication
//!
//! # Usage
//!
//! ```bash
//! ZAMMAD_BASE_URL=https://zammad.example.com ZAMMAD_TOKEN=xxx ./zammad-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use zammad_mcp::{config, server, zammad_client};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr (critical for stdio transport!)
    // stdout carries the MCP JSON-RPC stream
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("zammad_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Zammad MCP server v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate configuration from environment
    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(
        base_url = %config.base_url(),
        per_page = config.per_page(),
        compact_default = config.compact_default(),
        max_retries = config.retry_policy().max_retries,
        "Configuration loaded"
    );

    // Build the Zammad client (shared HTTP pool, read-only config)
    let client =
        zammad_client::ZammadClient::new(config).context("Failed to create Zammad client")?;

    // Check credentials and reachability once before serving
    tracing::info!("Testing connection to Zammad...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        // Keep going - Zammad may come back, and every tool reports its own error
        tracing::warn!(
            "Server will start but may not be able to reach Zammad. \
             Check configuration and network connectivity."
        );
    }

    // Register the Zammad tools
    let server = server::ZammadServer::new(client);

    tracing::info!("Server initialized, starting stdio transport");

    // Serve on stdio transport
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    // Wait for the host to close the session
    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
