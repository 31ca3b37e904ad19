//! # zammad-mcp
//!
//! An MCP (Model Context Protocol) server for the Zammad helpdesk.
//!
//! It exposes Zammad's REST API as MCP tools so an assistant can read and
//! work tickets, articles, users, organizations and report profiles.
//!
//! ## Features
//!
//! - **Tickets**: list (with name filters), get, create, update
//! - **Articles**: list a ticket's conversation, add notes and replies
//! - **Directory**: search, get and list users and organizations
//! - **Lookups**: ticket states, groups, priorities, report profiles
//! - **Compact output**: per-entity field allow-lists keep results small
//! - **Resilience**: retry with exponential backoff, jitter and `Retry-After`
//! - **Security**: tokens and passwords are never logged or returned
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with message sanitization
//! - [`retry`] - Backoff policy and `Retry-After` parsing
//! - [`zammad_client`] - Transport, retrying call wrapper, paginator and operations
//! - [`compact`] - Compact output transform
//! - [`server`] - MCP server implementation with tool routing
//! - [`models`] - Request descriptors, write payloads and entity kinds
//! - [`tools`] - Tool input parameter structs
//!
//! ## Configuration
//!
//! - `ZAMMAD_BASE_URL` (required): instance URL, `/api/v1` is appended
//! - `ZAMMAD_TOKEN`, or `ZAMMAD_USERNAME` and `ZAMMAD_PASSWORD`
//! - `ZAMMAD_VERIFY_SSL`, `ZAMMAD_TIMEOUT_SECONDS`, `ZAMMAD_PER_PAGE`
//! - `ZAMMAD_COMPACT_DEFAULT`, `ZAMMAD_ALLOW_PUBLIC_ARTICLES`
//! - `ZAMMAD_MAX_RETRIES`, `ZAMMAD_BACKOFF_INITIAL_SECONDS`,
//!   `ZAMMAD_BACKOFF_MAX_SECONDS`, `ZAMMAD_RETRY_JITTER`
//! - `RUST_LOG`: log level (e.g., `zammad_mcp=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use zammad_mcp::config::Config;
//! use zammad_mcp::tools::ListTicketsInput;
//! use zammad_mcp::zammad_client::ZammadClient;
//!
//! async fn example() -> Result<(), zammad_mcp::error::ZammadError> {
//!     let client = ZammadClient::new(Config::from_env()?)?;
//!
//!     let input = ListTicketsInput {
//!         state: Some("open".to_string()),
//!         per_page: Some(10),
//!         ..Default::default()
//!     };
//!     for ticket in client.list_tickets(&input).await? {
//!         println!("#{}: {}", ticket["number"], ticket["title"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compact;
pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod server;
pub mod tools;
pub mod zammad_client;
