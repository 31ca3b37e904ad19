//! Article payloads.

use serde::Serialize;

/// Content types Zammad accepts for article bodies.
pub const CONTENT_TYPES: &[&str] = &["text/html", "text/plain"];

/// Body of `POST /ticket_articles`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewArticle {
    /// Ticket the article belongs to.
    pub ticket_id: u64,

    /// Article body.
    pub body: String,

    /// Article type (`note`, `email`, `phone`, `web`, ...).
    #[serde(rename = "type")]
    pub article_type: String,

    /// Whether the article is hidden from the customer.
    pub internal: bool,

    /// `text/html` or `text/plain`.
    pub content_type: String,

    /// Subject line, mostly for emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Sender address.
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,

    /// Recipient address.
    #[serde(rename = "to", skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
}

/// Visibility actually sent to Zammad.
///
/// When public articles are not allowed every article is internal, whatever
/// the caller asked for.
pub fn effective_internal(requested_internal: bool, allow_public_articles: bool) -> bool {
    requested_internal || !allow_public_articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_internal() {
        assert!(effective_internal(true, true));
        assert!(!effective_internal(false, true));
        assert!(effective_internal(false, false));
        assert!(effective_internal(true, false));
    }

    #[test]
    fn test_new_article_serialization() {
        let article = NewArticle {
            ticket_id: 12,
            body: "Called the customer".to_string(),
            article_type: "phone".to_string(),
            internal: false,
            content_type: "text/plain".to_string(),
            subject: None,
            from_address: Some("agent@example.com".to_string()),
            to_address: None,
        };
        assert_eq!(
            serde_json::to_value(&article).unwrap(),
            json!({
                "ticket_id": 12,
                "body": "Called the customer",
                "type": "phone",
                "internal": false,
                "content_type": "text/plain",
                "from": "agent@example.com"
            })
        );
    }
}
