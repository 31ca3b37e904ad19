//! Ticket payloads and the ticket search query builder.

use serde::{Serialize, Serializer};

/// How a new ticket identifies its customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// An existing user ID.
    Id(u64),
    /// An email address Zammad resolves (or creates) on its own.
    Email(String),
}

impl Serialize for CustomerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CustomerRef::Id(id) => serializer.serialize_u64(*id),
            CustomerRef::Email(email) => serializer.serialize_str(&format!("guess:{}", email)),
        }
    }
}

/// Article attached to a ticket at creation time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTicketArticle {
    /// Article body.
    pub body: String,

    /// Article type (`note`, `email`, `phone`, ...).
    #[serde(rename = "type")]
    pub article_type: String,

    /// Whether the article is hidden from the customer.
    pub internal: bool,
}

/// Body of `POST /tickets`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTicket {
    /// Ticket title.
    pub title: String,

    /// Group name.
    pub group: String,

    /// Customer, by ID or email hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerRef>,

    /// State name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Priority name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Owning agent's user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    /// Initial article.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<NewTicketArticle>,
}

impl NewTicket {
    /// Creates a ticket payload with only the required fields.
    pub fn new(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
            customer_id: None,
            state: None,
            priority: None,
            owner_id: None,
            article: None,
        }
    }

    /// Sets the customer. A numeric ID wins over an email.
    pub fn with_customer(mut self, id: Option<u64>, email: Option<String>) -> Self {
        self.customer_id = id
            .map(CustomerRef::Id)
            .or_else(|| email.map(CustomerRef::Email));
        self
    }
}

/// Body of `PUT /tickets/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TicketUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New state name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// New priority name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// New owner user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    /// New customer user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    /// New organization ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
}

impl TicketUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &TicketUpdate::default()
    }
}

/// Filters for ticket listing, rendered as a Zammad search query.
///
/// Names are passed through verbatim; matching is left to Zammad.
#[derive(Debug, Clone, Default)]
pub struct TicketSearch {
    terms: Vec<String>,
}

impl TicketSearch {
    /// Creates an empty search (lists all tickets).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by state name (e.g. "new", "open").
    pub fn with_state(self, state: &str) -> Self {
        self.term("state.name", state)
    }

    /// Filters by priority name (e.g. "2 normal").
    pub fn with_priority(self, priority: &str) -> Self {
        self.term("priority.name", priority)
    }

    /// Filters by group name.
    pub fn with_group(self, group: &str) -> Self {
        self.term("group.name", group)
    }

    /// Filters by customer user ID.
    pub fn with_customer_id(self, id: u64) -> Self {
        self.term("customer_id", &id.to_string())
    }

    /// Filters by organization ID.
    pub fn with_organization_id(self, id: u64) -> Self {
        self.term("organization_id", &id.to_string())
    }

    /// Joins the filters with `AND`, or `None` when there are none.
    pub fn to_query(&self) -> Option<String> {
        (!self.terms.is_empty()).then(|| self.terms.join(" AND "))
    }

    fn term(mut self, field: &str, value: &str) -> Self {
        let value = if value.chars().any(char::is_whitespace) {
            format!("\"{}\"", value.replace('"', "\\\""))
        } else {
            value.to_string()
        };
        self.terms.push(format!("{}:{}", field, value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_ticket_with_email_customer() {
        let ticket = NewTicket::new("Login issue", "Support")
            .with_customer(None, Some("john@example.com".to_string()));
        assert_eq!(
            serde_json::to_value(&ticket).unwrap(),
            json!({
                "title": "Login issue",
                "group": "Support",
                "customer_id": "guess:john@example.com"
            })
        );
    }

    #[test]
    fn test_customer_id_wins_over_email() {
        let ticket = NewTicket::new("t", "g")
            .with_customer(Some(7), Some("john@example.com".to_string()));
        assert_eq!(ticket.customer_id, Some(CustomerRef::Id(7)));
        assert_eq!(serde_json::to_value(&ticket).unwrap()["customer_id"], json!(7));
    }

    #[test]
    fn test_ticket_article_type_renamed() {
        let article = NewTicketArticle {
            body: "hello".to_string(),
            article_type: "note".to_string(),
            internal: true,
        };
        assert_eq!(
            serde_json::to_value(&article).unwrap(),
            json!({"body": "hello", "type": "note", "internal": true})
        );
    }

    #[test]
    fn test_ticket_update_is_empty() {
        assert!(TicketUpdate::default().is_empty());
        let update = TicketUpdate {
            state: Some("closed".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"state": "closed"}));
    }

    #[test]
    fn test_ticket_search_query() {
        assert_eq!(TicketSearch::new().to_query(), None);

        let search = TicketSearch::new()
            .with_state("new")
            .with_priority("2 normal")
            .with_customer_id(5);
        assert_eq!(
            search.to_query().as_deref(),
            Some(r#"state.name:new AND priority.name:"2 normal" AND customer_id:5"#)
        );
    }
}
