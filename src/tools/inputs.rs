//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields and turns blank optional strings into `None`.
//! This should be called before processing input.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Drops a blank optional string but keeps non-blank text verbatim.
fn blank_to_none(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Input parameters for list tools that take no filter.
///
/// Used by users, organizations, states, groups, priorities and report profiles.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListInput {
    /// Page number, 1-based (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page (default: the configured page size).
    #[serde(default)]
    pub per_page: Option<u32>,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Input parameters for the search tools (users, organizations).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Search query string (name, email, login, ...).
    pub query: String,

    /// Page number, 1-based (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page (default: the configured page size).
    #[serde(default)]
    pub per_page: Option<u32>,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

impl SearchInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
            ..self
        }
    }
}

/// Input parameters for the zammad_list_tickets tool.
///
/// All fields are optional - use them to filter the results.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTicketsInput {
    /// Filter by ticket state name (e.g., "new", "open", "closed").
    #[serde(default)]
    pub state: Option<String>,

    /// Filter by priority name (e.g., "1 low", "2 normal", "3 high").
    #[serde(default)]
    pub priority: Option<String>,

    /// Filter by group name.
    #[serde(default)]
    pub group: Option<String>,

    /// Filter by customer user ID.
    #[serde(default)]
    pub customer_id: Option<u64>,

    /// Filter by organization ID.
    #[serde(default)]
    pub organization_id: Option<u64>,

    /// Page number, 1-based (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page (default: the configured page size).
    #[serde(default)]
    pub per_page: Option<u32>,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

impl ListTicketsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            state: trim_option(&self.state),
            priority: trim_option(&self.priority),
            group: trim_option(&self.group),
            ..self
        }
    }
}

/// Input parameters for the zammad_get_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketInput {
    /// Ticket ID.
    pub ticket_id: u64,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Input parameters for the zammad_create_ticket tool.
///
/// Title and group are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket title.
    pub title: String,

    /// Group name.
    pub group: String,

    /// Customer user ID (use zammad_search_users to find it).
    #[serde(default)]
    pub customer_id: Option<u64>,

    /// Alternative to customer_id: customer email, resolved or created by Zammad.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Ticket state name (e.g., "new", "open").
    #[serde(default)]
    pub state: Option<String>,

    /// Priority name (e.g., "2 normal").
    #[serde(default)]
    pub priority: Option<String>,

    /// Owning agent's user ID.
    #[serde(default)]
    pub owner_id: Option<u64>,

    /// Body of the initial article (optional).
    #[serde(default)]
    pub article_body: Option<String>,

    /// Initial article type (default: "note"). Options: "note", "email", "phone", ...
    #[serde(default)]
    pub article_type: Option<String>,

    /// If true, the initial article is internal (default: true).
    #[serde(default)]
    pub article_internal: Option<bool>,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

impl CreateTicketInput {
    /// Creates input with only the required fields set.
    pub fn new(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
            customer_id: None,
            customer_email: None,
            state: None,
            priority: None,
            owner_id: None,
            article_body: None,
            article_type: None,
            article_internal: None,
            compact: None,
        }
    }

    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            group: self.group.trim().to_string(),
            customer_email: trim_option(&self.customer_email),
            state: trim_option(&self.state),
            priority: trim_option(&self.priority),
            article_body: blank_to_none(self.article_body),
            article_type: trim_option(&self.article_type),
            ..self
        }
    }
}

/// Input parameters for the zammad_update_ticket tool.
///
/// Ticket ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// Ticket ID.
    pub ticket_id: u64,

    /// New title.
    #[serde(default)]
    pub title: Option<String>,

    /// New state name.
    #[serde(default)]
    pub state: Option<String>,

    /// New priority name.
    #[serde(default)]
    pub priority: Option<String>,

    /// New group name.
    #[serde(default)]
    pub group: Option<String>,

    /// New owner user ID.
    #[serde(default)]
    pub owner_id: Option<u64>,

    /// New customer user ID.
    #[serde(default)]
    pub customer_id: Option<u64>,

    /// New organization ID.
    #[serde(default)]
    pub organization_id: Option<u64>,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

impl UpdateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: trim_option(&self.title),
            state: trim_option(&self.state),
            priority: trim_option(&self.priority),
            group: trim_option(&self.group),
            ..self
        }
    }
}

/// Input parameters for the zammad_list_ticket_articles tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTicketArticlesInput {
    /// Ticket ID.
    pub ticket_id: u64,

    /// Page number, 1-based (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page (default: the configured page size).
    #[serde(default)]
    pub per_page: Option<u32>,

    /// If true, return a reduced field set (the body is always kept).
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Input parameters for the zammad_create_ticket_article tool.
///
/// Ticket ID and body are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketArticleInput {
    /// Ticket ID.
    pub ticket_id: u64,

    /// Article body.
    pub body: String,

    /// Article type (default: "note"). Options: "note", "email", "phone", "web", ...
    #[serde(default, rename = "type")]
    pub article_type: Option<String>,

    /// If true, the article is internal and hidden from the customer (default: true).
    #[serde(default)]
    pub internal: Option<bool>,

    /// Subject line (mainly for email articles).
    #[serde(default)]
    pub subject: Option<String>,

    /// From address (for email articles).
    #[serde(default)]
    pub from_address: Option<String>,

    /// To address (for email articles).
    #[serde(default)]
    pub to_address: Option<String>,

    /// "text/html" (default) or "text/plain".
    #[serde(default)]
    pub content_type: Option<String>,

    /// If true, return a reduced field set (the body is always kept).
    #[serde(default)]
    pub compact: Option<bool>,
}

impl CreateTicketArticleInput {
    /// Creates input with only the required fields set.
    pub fn new(ticket_id: u64, body: impl Into<String>) -> Self {
        Self {
            ticket_id,
            body: body.into(),
            article_type: None,
            internal: None,
            subject: None,
            from_address: None,
            to_address: None,
            content_type: None,
            compact: None,
        }
    }

    /// Sanitizes input by trimming whitespace from the metadata fields.
    ///
    /// The body is sent as written.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            article_type: trim_option(&self.article_type),
            subject: trim_option(&self.subject),
            from_address: trim_option(&self.from_address),
            to_address: trim_option(&self.to_address),
            content_type: trim_option(&self.content_type),
            ..self
        }
    }
}

/// Input parameters for the zammad_get_user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetUserInput {
    /// User ID.
    pub user_id: u64,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Input parameters for the zammad_get_organization tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetOrganizationInput {
    /// Organization ID.
    pub organization_id: u64,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Input parameters for the zammad_get_report_profile tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetReportProfileInput {
    /// Report profile ID.
    pub report_profile_id: u64,

    /// If true, return a reduced field set. Defaults to the server setting.
    #[serde(default)]
    pub compact: Option<bool>,
}
