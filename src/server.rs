//! MCP server implementation for Zammad.
//!
//! This module defines the `ZammadServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Zammad operations as tools. The tool
//! router doubles as the operation registry: each tool name maps to one
//! async handler taking named arguments.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Serialize;

use crate::error::ZammadError;
use crate::tools::{
    CreateTicketArticleInput, CreateTicketInput, GetOrganizationInput, GetReportProfileInput,
    GetTicketInput, GetUserInput, ListInput, ListTicketArticlesInput, ListTicketsInput,
    SearchInput, UpdateTicketInput,
};
use crate::zammad_client::ZammadClient;

/// The Zammad MCP server.
///
/// This server exposes Zammad helpdesk operations as MCP tools.
#[derive(Clone)]
pub struct ZammadServer {
    /// Zammad client for API operations.
    client: ZammadClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ZammadServer {
    /// Creates a new Zammad server instance.
    pub fn new(client: ZammadClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Zammad MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    #[tool(description = "List Zammad tickets, one page at a time. Optional filters: state, priority, group (names), customer_id, organization_id. Pagination: page (1-based), per_page.")]
    async fn zammad_list_tickets(
        &self,
        Parameters(input): Parameters<ListTicketsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "zammad_list_tickets tool called");

        let tickets = self
            .client
            .list_tickets(&input)
            .await
            .map_err(|e| self.failure("list tickets", &e))?;

        to_pretty_json(&tickets)
    }

    /// Get a single ticket.
    #[tool(description = "Get a single Zammad ticket by ID.")]
    async fn zammad_get_ticket(
        &self,
        Parameters(input): Parameters<GetTicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "zammad_get_ticket tool called");

        let ticket = self
            .client
            .get_ticket(input.ticket_id, input.compact)
            .await
            .map_err(|e| self.failure(&format!("get ticket {}", input.ticket_id), &e))?;

        to_pretty_json(&ticket)
    }

    /// Create a ticket.
    ///
    /// The initial article is forced internal when public articles are disabled.
    #[tool(description = "Create a Zammad ticket. Title and group are required. Identify the customer with customer_id or customer_email. An optional initial article can be added with article_body (internal by default).")]
    async fn zammad_create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(title = %input.title, group = %input.group, "zammad_create_ticket tool called");

        let ticket = self
            .client
            .create_ticket(&input)
            .await
            .map_err(|e| self.failure("create ticket", &e))?;

        tracing::info!(id = ?ticket.get("id"), "Ticket created");
        to_pretty_json(&ticket)
    }

    #[tool(description = "Update a Zammad ticket. ticket_id is required plus at least one of: title, state, priority, group, owner_id, customer_id, organization_id.")]
    async fn zammad_update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "zammad_update_ticket tool called");

        let ticket = self
            .client
            .update_ticket(&input)
            .await
            .map_err(|e| self.failure(&format!("update ticket {}", input.ticket_id), &e))?;

        to_pretty_json(&ticket)
    }

    // ========================================================================
    // Articles
    // ========================================================================

    #[tool(description = "List the articles (messages, notes) of a Zammad ticket, one page at a time. Article bodies are always included.")]
    async fn zammad_list_ticket_articles(
        &self,
        Parameters(input): Parameters<ListTicketArticlesInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "zammad_list_ticket_articles tool called");

        let articles = self
            .client
            .list_ticket_articles(&input)
            .await
            .map_err(|e| {
                self.failure(&format!("list articles for ticket {}", input.ticket_id), &e)
            })?;

        to_pretty_json(&articles)
    }

    #[tool(description = "Add an article to a Zammad ticket. ticket_id and body are required. Articles are internal by default; public articles may be disabled by the server. content_type is text/html (default) or text/plain.")]
    async fn zammad_create_ticket_article(
        &self,
        Parameters(input): Parameters<CreateTicketArticleInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(
            ticket_id = input.ticket_id,
            internal = ?input.internal,
            "zammad_create_ticket_article tool called"
        );

        let article = self
            .client
            .create_ticket_article(&input)
            .await
            .map_err(|e| {
                self.failure(&format!("create article on ticket {}", input.ticket_id), &e)
            })?;

        to_pretty_json(&article)
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[tool(description = "Search Zammad users by name, email or login. Returns one page of matches.")]
    async fn zammad_search_users(
        &self,
        Parameters(input): Parameters<SearchInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(query = %input.query, "zammad_search_users tool called");

        let users = self
            .client
            .search_users(&input)
            .await
            .map_err(|e| self.failure("search users", &e))?;

        to_pretty_json(&users)
    }

    #[tool(description = "Get a single Zammad user by ID.")]
    async fn zammad_get_user(
        &self,
        Parameters(input): Parameters<GetUserInput>,
    ) -> Result<String, String> {
        tracing::debug!(user_id = input.user_id, "zammad_get_user tool called");

        let user = self
            .client
            .get_user(input.user_id, input.compact)
            .await
            .map_err(|e| self.failure(&format!("get user {}", input.user_id), &e))?;

        to_pretty_json(&user)
    }

    #[tool(description = "List Zammad users, one page at a time.")]
    async fn zammad_list_users(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_users tool called");

        let users = self
            .client
            .list_users(&input)
            .await
            .map_err(|e| self.failure("list users", &e))?;

        to_pretty_json(&users)
    }

    // ========================================================================
    // Organizations
    // ========================================================================

    #[tool(description = "Search Zammad organizations by name. Returns one page of matches.")]
    async fn zammad_search_organizations(
        &self,
        Parameters(input): Parameters<SearchInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(query = %input.query, "zammad_search_organizations tool called");

        let organizations = self
            .client
            .search_organizations(&input)
            .await
            .map_err(|e| self.failure("search organizations", &e))?;

        to_pretty_json(&organizations)
    }

    #[tool(description = "Get a single Zammad organization by ID.")]
    async fn zammad_get_organization(
        &self,
        Parameters(input): Parameters<GetOrganizationInput>,
    ) -> Result<String, String> {
        tracing::debug!(
            organization_id = input.organization_id,
            "zammad_get_organization tool called"
        );

        let organization = self
            .client
            .get_organization(input.organization_id, input.compact)
            .await
            .map_err(|e| {
                self.failure(&format!("get organization {}", input.organization_id), &e)
            })?;

        to_pretty_json(&organization)
    }

    #[tool(description = "List Zammad organizations, one page at a time.")]
    async fn zammad_list_organizations(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_organizations tool called");

        let organizations = self
            .client
            .list_organizations(&input)
            .await
            .map_err(|e| self.failure("list organizations", &e))?;

        to_pretty_json(&organizations)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    #[tool(description = "List Zammad ticket states (new, open, closed, ...). Use the names when filtering or updating tickets.")]
    async fn zammad_list_ticket_states(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_ticket_states tool called");

        let states = self
            .client
            .list_ticket_states(&input)
            .await
            .map_err(|e| self.failure("list ticket states", &e))?;

        to_pretty_json(&states)
    }

    #[tool(description = "List Zammad groups. Use the names when creating or filtering tickets.")]
    async fn zammad_list_groups(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_groups tool called");

        let groups = self
            .client
            .list_groups(&input)
            .await
            .map_err(|e| self.failure("list groups", &e))?;

        to_pretty_json(&groups)
    }

    #[tool(description = "List Zammad ticket priorities (e.g. '1 low', '2 normal', '3 high').")]
    async fn zammad_list_priorities(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_priorities tool called");

        let priorities = self
            .client
            .list_priorities(&input)
            .await
            .map_err(|e| self.failure("list priorities", &e))?;

        to_pretty_json(&priorities)
    }

    // ========================================================================
    // Report profiles
    // ========================================================================

    #[tool(description = "List Zammad report profiles. Requires the 'report' permission.")]
    async fn zammad_list_report_profiles(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "zammad_list_report_profiles tool called");

        let profiles = self
            .client
            .list_report_profiles(&input)
            .await
            .map_err(|e| self.failure("list report profiles", &e))?;

        to_pretty_json(&profiles)
    }

    #[tool(description = "Get a single Zammad report profile by ID, including its condition. Requires the 'report' permission.")]
    async fn zammad_get_report_profile(
        &self,
        Parameters(input): Parameters<GetReportProfileInput>,
    ) -> Result<String, String> {
        tracing::debug!(
            report_profile_id = input.report_profile_id,
            "zammad_get_report_profile tool called"
        );

        let profile = self
            .client
            .get_report_profile(input.report_profile_id, input.compact)
            .await
            .map_err(|e| {
                self.failure(
                    &format!("get report profile {}", input.report_profile_id),
                    &e,
                )
            })?;

        to_pretty_json(&profile)
    }

    /// Logs a failed operation and renders it for the MCP host.
    fn failure(&self, action: &str, error: &ZammadError) -> String {
        let sanitized = self.sanitize_error(error);
        tracing::error!(error = %sanitized, "Failed to {}", action);
        format!("Failed to {}: {}", action, sanitized)
    }

    /// Sanitizes an error message to remove the token or password.
    fn sanitize_error(&self, error: &ZammadError) -> String {
        error.sanitized_display(&self.client.secrets())
    }
}

#[tool_handler]
impl ServerHandler for ZammadServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Zammad MCP provides access to a Zammad helpdesk. \
                 Use zammad_list_tickets to find tickets and zammad_get_ticket for details. \
                 Read the conversation with zammad_list_ticket_articles and reply with \
                 zammad_create_ticket_article. Create and modify tickets with \
                 zammad_create_ticket and zammad_update_ticket. Look up names with \
                 zammad_list_ticket_states, zammad_list_groups and zammad_list_priorities, \
                 and people with zammad_search_users and zammad_search_organizations. \
                 List tools are paginated (page, per_page); set compact=false for full records. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serializes a tool result as pretty JSON.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to format result: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn test_client() -> ZammadClient {
        let config = Config::builder("https://zammad.example.com")
            .token("test_token_12345")
            .build()
            .expect("Failed to build test config");
        ZammadClient::new(config).expect("Failed to create test client")
    }

    #[test]
    fn test_server_creation() {
        let server = ZammadServer::new(test_client());
        let info = server.get_info();
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_server_info_has_tools_capability() {
        let server = ZammadServer::new(test_client());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_ping_tool_returns_pong() {
        let server = ZammadServer::new(test_client());
        assert_eq!(server.ping(), "pong");
    }

    #[test]
    fn test_registry_lists_every_operation() {
        let server = ZammadServer::new(test_client());
        let expected = vec![
            "ping",
            "zammad_create_ticket",
            "zammad_create_ticket_article",
            "zammad_get_organization",
            "zammad_get_report_profile",
            "zammad_get_ticket",
            "zammad_get_user",
            "zammad_list_groups",
            "zammad_list_organizations",
            "zammad_list_priorities",
            "zammad_list_report_profiles",
            "zammad_list_ticket_articles",
            "zammad_list_ticket_states",
            "zammad_list_tickets",
            "zammad_list_users",
            "zammad_search_organizations",
            "zammad_search_users",
            "zammad_update_ticket",
        ];
        assert_eq!(server.tool_names(), expected);
    }

    #[test]
    fn test_failure_redacts_token() {
        let server = ZammadServer::new(test_client());
        let err = ZammadError::validation("rejected token test_token_12345");
        let message = server.failure("get ticket 5", &err);
        assert!(message.starts_with("Failed to get ticket 5: "));
        assert!(!message.contains("test_token_12345"));
        assert!(message.contains("[REDACTED]"));
    }

    #[test]
    fn test_to_pretty_json() {
        let rendered = to_pretty_json(&json!({"id": 1, "title": "Login issue"})).unwrap();
        assert_eq!(rendered, "{\n  \"id\": 1,\n  \"title\": \"Login issue\"\n}");
    }

    #[tokio::test]
    async fn test_invalid_id_fails_without_request() {
        let server = ZammadServer::new(test_client());
        let result = server
            .zammad_get_ticket(Parameters(GetTicketInput {
                ticket_id: 0,
                compact: None,
            }))
            .await;
        let err = result.unwrap_err();
        assert!(err.starts_with("Failed to get ticket 0: validation error"));
    }
}
