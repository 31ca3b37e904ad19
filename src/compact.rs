//! Compact output mode.
//!
//! Compaction keeps the allow-listed fields of an [`EntityKind`] in
//! allow-list order, then any free-text field (`body`, `note`, ...) the list
//! did not name. Missing fields are omitted, never filled with `null`.

use serde_json::{Map, Value};

use crate::models::EntityKind;

/// Reduces one record to its compact field set.
///
/// Non-object values are returned unchanged.
pub fn compact(record: Value, kind: EntityKind) -> Value {
    let Value::Object(source) = record else {
        return record;
    };

    let allowed = kind.compact_fields();
    let mut out = Map::with_capacity(allowed.len());

    for field in allowed {
        if let Some(value) = source.get(*field) {
            out.insert((*field).to_string(), value.clone());
        }
    }

    for (field, value) in source {
        if kind.is_free_text(&field) && !allowed.contains(&field.as_str()) {
            out.insert(field, value);
        }
    }

    Value::Object(out)
}

/// Compacts a single record or every element of an array.
pub fn compact_value(value: Value, kind: EntityKind) -> Value {
    match value {
        Value::Array(items) => Value::Array(compact_all(items, kind)),
        other => compact(other, kind),
    }
}

/// Compacts each record of a page.
pub fn compact_all(records: Vec<Value>, kind: EntityKind) -> Vec<Value> {
    records.into_iter().map(|r| compact(r, kind)).collect()
}

/// Applies [`compact_value`] only when `enabled`.
pub fn maybe_compact(value: Value, kind: EntityKind, enabled: bool) -> Value {
    if enabled {
        compact_value(value, kind)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_article() -> Value {
        json!({
            "id": 55,
            "ticket_id": 12,
            "type": "note",
            "sender": "Agent",
            "body": "<p>Printer is on fire</p>",
            "internal": true,
            "updated_by_id": 3,
            "preferences": {"highlight": ""},
            "attachments": []
        })
    }

    #[test]
    fn test_compact_keeps_allow_list_in_order() {
        let ticket = json!({
            "title": "Login issue",
            "preferences": {"channel_id": 3},
            "id": 7,
            "state_id": 1,
            "number": "31001",
            "article_count": 4
        });
        let compacted = compact(ticket, EntityKind::Ticket);
        let keys: Vec<&str> = compacted
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "number", "title", "state_id"]);
    }

    #[test]
    fn test_compact_never_inserts_nulls() {
        let compacted = compact(json!({"id": 1}), EntityKind::User);
        assert_eq!(compacted, json!({"id": 1}));
    }

    #[test]
    fn test_compact_preserves_article_body() {
        let compacted = compact(full_article(), EntityKind::Article);
        assert_eq!(compacted["body"], json!("<p>Printer is on fire</p>"));
        assert!(compacted.get("preferences").is_none());
        assert!(compacted.get("attachments").is_none());
    }

    #[test]
    fn test_compact_keeps_free_text_outside_allow_list() {
        let user = json!({"id": 4, "login": "jdoe", "note": "VIP customer", "image": "abc"});
        let compacted = compact(user, EntityKind::User);
        assert_eq!(
            compacted,
            json!({"id": 4, "login": "jdoe", "note": "VIP customer"})
        );
    }

    #[test]
    fn test_compact_keeps_report_profile_condition() {
        let profile = json!({
            "id": 2,
            "name": "Escalations",
            "condition": {"ticket.priority_id": {"operator": "is", "value": ["3"]}},
            "updated_by_id": 1
        });
        let compacted = compact(profile.clone(), EntityKind::ReportProfile);
        assert_eq!(compacted["condition"], profile["condition"]);
        assert!(compacted.get("updated_by_id").is_none());
    }

    #[test]
    fn test_compact_is_idempotent() {
        for kind in EntityKind::ALL {
            let once = compact(full_article(), kind);
            let twice = compact(once.clone(), kind);
            assert_eq!(once, twice, "{kind}");
        }
    }

    #[test]
    fn test_compact_value_is_element_wise() {
        let page = json!([full_article(), full_article()]);
        let compacted = compact_value(page, EntityKind::Article);
        let items = compacted.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], compact(full_article(), EntityKind::Article));
    }

    #[test]
    fn test_maybe_compact_disabled_returns_input() {
        assert_eq!(
            maybe_compact(full_article(), EntityKind::Article, false),
            full_article()
        );
    }

    #[test]
    fn test_compact_passes_non_objects_through() {
        assert_eq!(compact(json!("text"), EntityKind::Ticket), json!("text"));
        assert_eq!(compact(Value::Null, EntityKind::Group), Value::Null);
    }
}
