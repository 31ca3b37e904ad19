//! HTTP client for the Zammad REST API.
//!
//! This module provides the `ZammadClient` struct, which layers:
//!
//! - [`ZammadClient::send`]: one authenticated request, JSON decoding and
//!   status classification
//! - [`ZammadClient::call`]: `send` with retry on transient failures
//! - [`ZammadClient::fetch_page`]: a single 1-based page of a list endpoint
//! - one method per Zammad operation, applying compact output
//!
//! # Retry Logic
//!
//! HTTP 429/502/503/504, timeouts and refused or reset connections are
//! retried up to `max_retries` times with exponential backoff and jitter. A
//! `Retry-After` header replaces the computed delay. Every other failure is
//! returned on first occurrence.
//!
//! # Security
//!
//! The token and password are never logged. Error bodies are sanitized
//! before they are stored in an error.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use crate::compact::{compact_all, maybe_compact};
use crate::config::{Config, Credentials};
use crate::error::ZammadError;
use crate::models::{
    effective_internal, EntityKind, NewArticle, NewTicket, NewTicketArticle, RequestDescriptor,
    TicketSearch, TicketUpdate, CONTENT_TYPES,
};
use crate::retry::parse_retry_after;
use crate::tools::{
    CreateTicketArticleInput, CreateTicketInput, ListInput, ListTicketArticlesInput,
    ListTicketsInput, SearchInput, UpdateTicketInput,
};

/// REST API prefix appended to the instance URL.
const API_PREFIX: &str = "/api/v1";

/// Article type used when the caller does not pick one.
const DEFAULT_ARTICLE_TYPE: &str = "note";

/// Content type used when the caller does not pick one.
const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// HTTP client for the Zammad API.
///
/// Cloning is cheap: the HTTP connection pool and configuration are shared.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = ZammadClient::new(config)?;
///
/// let ticket = client.get_ticket(42, Some(true)).await?;
/// ```
#[derive(Clone)]
pub struct ZammadClient {
    /// The underlying HTTP client.
    http: Client,

    /// API root, e.g. `https://zammad.example.com/api/v1`.
    api_base: String,

    /// Read-only settings.
    config: Arc<Config>,
}

impl ZammadClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: Config) -> Result<Self, ZammadError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_ssl())
            .build()
            .map_err(ZammadError::HttpClient)?;

        let api_base = Self::normalize_api_base(config.base_url());

        if config.credentials().is_none() {
            tracing::warn!(
                "No Zammad credentials configured; every tool call will fail until \
                 ZAMMAD_TOKEN or ZAMMAD_USERNAME/ZAMMAD_PASSWORD are set"
            );
        }

        Ok(Self {
            http,
            api_base,
            config: Arc::new(config),
        })
    }

    /// Normalizes the base URL so it ends with `/api/v1`.
    fn normalize_api_base(url: &str) -> String {
        let url = url.trim_end_matches('/');
        if url.ends_with(API_PREFIX) {
            url.to_string()
        } else if url.ends_with("/api") {
            format!("{}/v1", url)
        } else {
            format!("{}{}", url, API_PREFIX)
        }
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Secrets to strip from anything shown to users.
    ///
    /// This should ONLY be used for sanitizing messages, never for logging.
    pub(crate) fn secrets(&self) -> Vec<&str> {
        match self.config.credentials() {
            Some(Credentials::Token(token)) => vec![token.as_str()],
            Some(Credentials::Basic { password, .. }) => vec![password.as_str()],
            None => Vec::new(),
        }
    }

    /// Resolves the effective compact flag: call override, else the server default.
    fn want_compact(&self, compact: Option<bool>) -> bool {
        compact.unwrap_or_else(|| self.config.compact_default())
    }

    /// Validates that an ID is a positive integer.
    fn validate_id(id: u64, field_name: &str) -> Result<(), ZammadError> {
        if id == 0 {
            return Err(ZammadError::validation(format!(
                "{} must be a positive integer",
                field_name
            )));
        }
        Ok(())
    }

    /// Validates an optional ID.
    fn validate_optional_id(id: Option<u64>, field_name: &str) -> Result<(), ZammadError> {
        id.map_or(Ok(()), |id| Self::validate_id(id, field_name))
    }

    /// Validates that a required string is non-empty.
    fn require_text(value: &str, field_name: &str) -> Result<(), ZammadError> {
        if value.trim().is_empty() {
            return Err(ZammadError::validation(format!(
                "{} is required and cannot be empty",
                field_name
            )));
        }
        Ok(())
    }

    /// Tests connectivity and credentials by fetching the current user.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::ConnectionTest` describing the likely cause.
    pub async fn test_connection(&self) -> Result<(), ZammadError> {
        tracing::debug!("Testing connection to Zammad");

        match self.call(&RequestDescriptor::get("/users/me")).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(ZammadError::Config(message)) => Err(ZammadError::connection_test(message)),
            Err(ZammadError::Upstream { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Err(ZammadError::connection_test(
                    "Authentication failed - verify ZAMMAD_TOKEN or ZAMMAD_USERNAME/ZAMMAD_PASSWORD",
                ))
            }
            Err(e @ ZammadError::Network { .. }) => Err(ZammadError::connection_test(format!(
                "{} - verify ZAMMAD_BASE_URL is correct and the server is reachable",
                e.sanitized_display(&self.secrets())
            ))),
            Err(e) => Err(ZammadError::connection_test(
                e.sanitized_display(&self.secrets()),
            )),
        }
    }

    // ========================================================================
    // Transport, retry and pagination
    // ========================================================================

    /// Sends one request without retrying.
    ///
    /// Exactly one authentication scheme is attached. A 2xx response is
    /// decoded as JSON; an empty body becomes an empty object.
    ///
    /// # Errors
    ///
    /// - `ZammadError::Config` if no credentials are configured (nothing is sent)
    /// - `ZammadError::Upstream` for non-2xx responses
    /// - `ZammadError::Network` for transport failures
    /// - `ZammadError::Serialization` if a 2xx body is not valid JSON
    pub async fn send(&self, desc: &RequestDescriptor) -> Result<Value, ZammadError> {
        let credentials = self
            .config
            .credentials()
            .ok_or_else(ZammadError::missing_credentials)?;

        let url = format!("{}{}", self.api_base, desc.path);

        tracing::debug!(
            method = %desc.method,
            path = %desc.path,
            "Making Zammad API request"
        );

        let mut req = self
            .http
            .request(desc.method.clone(), &url)
            .header(ACCEPT, "application/json");

        req = match credentials {
            Credentials::Token(token) => {
                req.header(AUTHORIZATION, format!("Token token={}", token))
            }
            Credentials::Basic { username, password } => req.basic_auth(username, Some(password)),
        };

        if !desc.query.is_empty() {
            req = req.query(&desc.query);
        }
        if let Some(body) = &desc.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(ZammadError::network)?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(desc, status, response).await);
        }

        let body = response.text().await.map_err(ZammadError::network)?;

        tracing::trace!(body = %body, "Zammad API response");

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Converts a non-2xx response into `ZammadError::Upstream`.
    async fn handle_http_error(
        &self,
        desc: &RequestDescriptor,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ZammadError {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_retry_after(v, Utc::now()));

        let text = response.text().await.unwrap_or_default();
        let text = ZammadError::sanitize_message(&text, &self.secrets());
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!(path = %desc.path, ?retry_after, "Rate limited by Zammad");
            }
            s if s.is_server_error() => {
                tracing::warn!(status = %s, path = %desc.path, "Zammad server error");
            }
            _ => {}
        }

        ZammadError::Upstream {
            status,
            method: desc.method.clone(),
            path: desc.path.clone(),
            body,
            retry_after,
        }
    }

    /// Sends a request, retrying transient failures.
    ///
    /// The descriptor is re-sent unchanged on every attempt. After the last
    /// attempt the final error is returned; network errors carry the total
    /// attempt count.
    pub async fn call(&self, desc: &RequestDescriptor) -> Result<Value, ZammadError> {
        let policy = self.config.retry_policy();
        let max_attempts = policy.max_attempts();
        let mut attempt = 0u32;

        loop {
            match self.send(desc).await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(
                            method = %desc.method,
                            path = %desc.path,
                            attempts = attempt + 1,
                            "Request succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt + 1 < max_attempts => {
                    let delay = policy.delay_for_attempt(attempt, e.retry_after());

                    tracing::debug!(
                        method = %desc.method,
                        path = %desc.path,
                        attempt = attempt + 1,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e.sanitized_display(&self.secrets()),
                        "Retrying after transient error"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    if attempt > 0 {
                        tracing::debug!(
                            method = %desc.method,
                            path = %desc.path,
                            attempts = attempt + 1,
                            "All retry attempts exhausted"
                        );
                    }
                    return Err(e.with_attempts(attempt + 1));
                }
            }
        }
    }

    /// Fetches one page of a list endpoint.
    ///
    /// `page` and `per_page` are merged into the descriptor's query. The
    /// records are returned as Zammad delivered them; a page past the end is
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Validation` if `page < 1` or `per_page == 0`.
    pub async fn fetch_page(
        &self,
        desc: RequestDescriptor,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>, ZammadError> {
        if page < 1 {
            return Err(ZammadError::validation("page must be >= 1"));
        }
        if per_page == 0 {
            return Err(ZammadError::validation("per_page must be > 0"));
        }

        let desc = desc
            .with_query("page", page)
            .with_query("per_page", per_page);

        let result = self.call(&desc).await?;
        Ok(into_records(result))
    }

    /// Fetches a page using call-level overrides, else the configured page size.
    async fn fetch_page_with(
        &self,
        desc: RequestDescriptor,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<Value>, ZammadError> {
        let per_page = per_page.unwrap_or_else(|| self.config.per_page());
        self.fetch_page(desc, page.unwrap_or(1), per_page).await
    }

    /// Lists one page of a resource and compacts it.
    async fn list_resource(
        &self,
        desc: RequestDescriptor,
        kind: EntityKind,
        page: Option<u32>,
        per_page: Option<u32>,
        compact: Option<bool>,
    ) -> Result<Vec<Value>, ZammadError> {
        let records = self.fetch_page_with(desc, page, per_page).await?;
        if self.want_compact(compact) {
            Ok(compact_all(records, kind))
        } else {
            Ok(records)
        }
    }

    /// Fetches a single resource by ID and compacts it.
    async fn get_resource(
        &self,
        collection: &str,
        id_field: &str,
        id: u64,
        kind: EntityKind,
        compact: Option<bool>,
    ) -> Result<Value, ZammadError> {
        Self::validate_id(id, id_field)?;
        let desc = RequestDescriptor::get(format!("/{}/{}", collection, id));
        let record = self.call(&desc).await?;
        Ok(maybe_compact(record, kind, self.want_compact(compact)))
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Lists one page of tickets, optionally filtered.
    ///
    /// Without filters this reads `/tickets`; with filters it searches
    /// `/tickets/search` and lets Zammad match the names.
    pub async fn list_tickets(&self, input: &ListTicketsInput) -> Result<Vec<Value>, ZammadError> {
        Self::validate_optional_id(input.customer_id, "customer_id")?;
        Self::validate_optional_id(input.organization_id, "organization_id")?;

        let mut search = TicketSearch::new();
        if let Some(state) = input.state.as_deref() {
            search = search.with_state(state);
        }
        if let Some(priority) = input.priority.as_deref() {
            search = search.with_priority(priority);
        }
        if let Some(group) = input.group.as_deref() {
            search = search.with_group(group);
        }
        if let Some(customer_id) = input.customer_id {
            search = search.with_customer_id(customer_id);
        }
        if let Some(organization_id) = input.organization_id {
            search = search.with_organization_id(organization_id);
        }

        let desc = match search.to_query() {
            Some(query) => RequestDescriptor::get("/tickets/search")
                .with_query("query", query)
                .with_query("expand", true),
            None => RequestDescriptor::get("/tickets"),
        };

        self.list_resource(
            desc,
            EntityKind::Ticket,
            input.page,
            input.per_page,
            input.compact,
        )
        .await
    }

    /// Gets a single ticket.
    pub async fn get_ticket(
        &self,
        ticket_id: u64,
        compact: Option<bool>,
    ) -> Result<Value, ZammadError> {
        self.get_resource("tickets", "ticket_id", ticket_id, EntityKind::Ticket, compact)
            .await
    }

    /// Creates a ticket, optionally with an initial article.
    ///
    /// When public articles are disabled the initial article is always
    /// internal.
    pub async fn create_ticket(&self, input: &CreateTicketInput) -> Result<Value, ZammadError> {
        Self::require_text(&input.title, "title")?;
        Self::require_text(&input.group, "group")?;
        Self::validate_optional_id(input.customer_id, "customer_id")?;
        Self::validate_optional_id(input.owner_id, "owner_id")?;

        let mut ticket = NewTicket::new(&input.title, &input.group)
            .with_customer(input.customer_id, input.customer_email.clone());
        ticket.state = input.state.clone();
        ticket.priority = input.priority.clone();
        ticket.owner_id = input.owner_id;

        if let Some(body) = input.article_body.as_deref().filter(|b| !b.trim().is_empty()) {
            ticket.article = Some(NewTicketArticle {
                body: body.to_string(),
                article_type: input
                    .article_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ARTICLE_TYPE.to_string()),
                internal: self.article_visibility(input.article_internal),
            });
        }

        let desc = RequestDescriptor::post("/tickets", serde_json::to_value(&ticket)?);
        let created = self.call(&desc).await?;

        Ok(maybe_compact(
            created,
            EntityKind::Ticket,
            self.want_compact(input.compact),
        ))
    }

    /// Updates the given fields of a ticket.
    pub async fn update_ticket(&self, input: &UpdateTicketInput) -> Result<Value, ZammadError> {
        Self::validate_id(input.ticket_id, "ticket_id")?;
        Self::validate_optional_id(input.owner_id, "owner_id")?;
        Self::validate_optional_id(input.customer_id, "customer_id")?;
        Self::validate_optional_id(input.organization_id, "organization_id")?;

        let update = TicketUpdate {
            title: input.title.clone(),
            state: input.state.clone(),
            priority: input.priority.clone(),
            group: input.group.clone(),
            owner_id: input.owner_id,
            customer_id: input.customer_id,
            organization_id: input.organization_id,
        };
        if update.is_empty() {
            return Err(ZammadError::validation(
                "at least one field must be provided for update (title, state, priority, \
                 group, owner_id, customer_id or organization_id)",
            ));
        }

        let desc = RequestDescriptor::put(
            format!("/tickets/{}", input.ticket_id),
            serde_json::to_value(&update)?,
        );
        let updated = self.call(&desc).await?;

        Ok(maybe_compact(
            updated,
            EntityKind::Ticket,
            self.want_compact(input.compact),
        ))
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Lists one page of a ticket's articles.
    pub async fn list_ticket_articles(
        &self,
        input: &ListTicketArticlesInput,
    ) -> Result<Vec<Value>, ZammadError> {
        Self::validate_id(input.ticket_id, "ticket_id")?;
        let desc = RequestDescriptor::get(format!("/ticket_articles/by_ticket/{}", input.ticket_id));
        self.list_resource(
            desc,
            EntityKind::Article,
            input.page,
            input.per_page,
            input.compact,
        )
        .await
    }

    /// Adds an article to a ticket.
    ///
    /// When public articles are disabled the article is always internal.
    pub async fn create_ticket_article(
        &self,
        input: &CreateTicketArticleInput,
    ) -> Result<Value, ZammadError> {
        Self::validate_id(input.ticket_id, "ticket_id")?;
        Self::require_text(&input.body, "body")?;

        let content_type = input
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        if !CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ZammadError::validation(format!(
                "content_type must be one of {}, got: {:?}",
                CONTENT_TYPES.join(", "),
                content_type
            )));
        }

        let article = NewArticle {
            ticket_id: input.ticket_id,
            body: input.body.clone(),
            article_type: input
                .article_type
                .clone()
                .unwrap_or_else(|| DEFAULT_ARTICLE_TYPE.to_string()),
            internal: self.article_visibility(input.internal),
            content_type,
            subject: input.subject.clone(),
            from_address: input.from_address.clone(),
            to_address: input.to_address.clone(),
        };

        let desc = RequestDescriptor::post("/ticket_articles", serde_json::to_value(&article)?);
        let created = self.call(&desc).await?;

        Ok(maybe_compact(
            created,
            EntityKind::Article,
            self.want_compact(input.compact),
        ))
    }

    /// Internal flag actually sent; new articles default to internal.
    fn article_visibility(&self, requested: Option<bool>) -> bool {
        let requested = requested.unwrap_or(true);
        let internal = effective_internal(requested, self.config.allow_public_articles());
        if internal != requested {
            tracing::debug!("Public articles are disabled; creating the article as internal");
        }
        internal
    }

    // ========================================================================
    // Users and organizations
    // ========================================================================

    /// Searches users by name, email or login.
    pub async fn search_users(&self, input: &SearchInput) -> Result<Vec<Value>, ZammadError> {
        Self::require_text(&input.query, "query")?;
        let desc = RequestDescriptor::get("/users/search").with_query("query", &input.query);
        self.list_resource(desc, EntityKind::User, input.page, input.per_page, input.compact)
            .await
    }

    /// Gets a single user.
    pub async fn get_user(&self, user_id: u64, compact: Option<bool>) -> Result<Value, ZammadError> {
        self.get_resource("users", "user_id", user_id, EntityKind::User, compact)
            .await
    }

    /// Lists one page of users.
    pub async fn list_users(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/users", EntityKind::User, input).await
    }

    /// Searches organizations by name.
    pub async fn search_organizations(
        &self,
        input: &SearchInput,
    ) -> Result<Vec<Value>, ZammadError> {
        Self::require_text(&input.query, "query")?;
        let desc =
            RequestDescriptor::get("/organizations/search").with_query("query", &input.query);
        self.list_resource(
            desc,
            EntityKind::Organization,
            input.page,
            input.per_page,
            input.compact,
        )
        .await
    }

    /// Gets a single organization.
    pub async fn get_organization(
        &self,
        organization_id: u64,
        compact: Option<bool>,
    ) -> Result<Value, ZammadError> {
        self.get_resource(
            "organizations",
            "organization_id",
            organization_id,
            EntityKind::Organization,
            compact,
        )
        .await
    }

    /// Lists one page of organizations.
    pub async fn list_organizations(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/organizations", EntityKind::Organization, input)
            .await
    }

    // ========================================================================
    // Lookups and report profiles
    // ========================================================================

    /// Lists ticket states.
    pub async fn list_ticket_states(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/ticket_states", EntityKind::State, input)
            .await
    }

    /// Lists groups.
    pub async fn list_groups(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/groups", EntityKind::Group, input).await
    }

    /// Lists ticket priorities.
    pub async fn list_priorities(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/ticket_priorities", EntityKind::Priority, input)
            .await
    }

    /// Lists report profiles. Requires the `report` permission.
    pub async fn list_report_profiles(&self, input: &ListInput) -> Result<Vec<Value>, ZammadError> {
        self.list_plain("/report_profiles", EntityKind::ReportProfile, input)
            .await
    }

    /// Gets a report profile. Requires the `report` permission.
    pub async fn get_report_profile(
        &self,
        report_profile_id: u64,
        compact: Option<bool>,
    ) -> Result<Value, ZammadError> {
        self.get_resource(
            "report_profiles",
            "report_profile_id",
            report_profile_id,
            EntityKind::ReportProfile,
            compact,
        )
        .await
    }

    async fn list_plain(
        &self,
        path: &str,
        kind: EntityKind,
        input: &ListInput,
    ) -> Result<Vec<Value>, ZammadError> {
        self.list_resource(
            RequestDescriptor::get(path),
            kind,
            input.page,
            input.per_page,
            input.compact,
        )
        .await
    }
}

/// Turns a list response into records: arrays as-is, empty bodies as no records.
fn into_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_api_base() {
        assert_eq!(
            ZammadClient::normalize_api_base("https://zammad.example.com"),
            "https://zammad.example.com/api/v1"
        );
        assert_eq!(
            ZammadClient::normalize_api_base("https://zammad.example.com/"),
            "https://zammad.example.com/api/v1"
        );
        assert_eq!(
            ZammadClient::normalize_api_base("https://zammad.example.com/api"),
            "https://zammad.example.com/api/v1"
        );
        assert_eq!(
            ZammadClient::normalize_api_base("https://zammad.example.com/api/v1/"),
            "https://zammad.example.com/api/v1"
        );
    }

    #[test]
    fn test_validate_id() {
        assert!(ZammadClient::validate_id(1, "ticket_id").is_ok());
        let err = ZammadClient::validate_id(0, "ticket_id").unwrap_err();
        assert!(err.to_string().contains("ticket_id"));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_require_text() {
        assert!(ZammadClient::require_text("Login issue", "title").is_ok());
        assert!(ZammadClient::require_text("   ", "title").is_err());
    }

    #[test]
    fn test_into_records() {
        assert_eq!(into_records(json!([{"id": 1}, {"id": 2}])).len(), 2);
        assert!(into_records(json!([])).is_empty());
        assert!(into_records(json!({})).is_empty());
        assert!(into_records(Value::Null).is_empty());
        assert_eq!(into_records(json!({"id": 1})), vec![json!({"id": 1})]);
    }

    fn client_with(builder: crate::config::ConfigBuilder) -> ZammadClient {
        ZammadClient::new(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_secrets_for_token_and_basic() {
        let client = client_with(Config::builder("https://z.example.com").token("abc123"));
        assert_eq!(client.secrets(), vec!["abc123"]);

        let client = client_with(
            Config::builder("https://z.example.com")
                .username("agent")
                .password("hunter2"),
        );
        assert_eq!(client.secrets(), vec!["hunter2"]);
    }

    #[test]
    fn test_want_compact_falls_back_to_default() {
        let client = client_with(
            Config::builder("https://z.example.com")
                .token("abc123")
                .compact_default(false),
        );
        assert!(!client.want_compact(None));
        assert!(client.want_compact(Some(true)));
    }

    #[test]
    fn test_article_visibility_forced_internal() {
        let client = client_with(
            Config::builder("https://z.example.com")
                .token("abc123")
                .allow_public_articles(false),
        );
        assert!(client.article_visibility(Some(false)));
        assert!(client.article_visibility(None));

        let client = client_with(Config::builder("https://z.example.com").token("abc123"));
        assert!(!client.article_visibility(Some(false)));
        assert!(client.article_visibility(None));
    }
}
