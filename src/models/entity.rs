//! Entity kinds returned by the Zammad API and their compact field sets.

use std::fmt;

/// Fields kept for any entity kind, whatever its allow-list says.
pub const FREE_TEXT_FIELDS: &[&str] = &["body", "note", "content"];

/// The kind of record a response contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A support ticket.
    Ticket,
    /// A ticket article (note, email, phone log, ...).
    Article,
    /// An agent or customer account.
    User,
    /// A customer organization.
    Organization,
    /// A ticket state such as "new" or "closed".
    State,
    /// An agent group.
    Group,
    /// A ticket priority.
    Priority,
    /// An admin-authored report profile.
    ReportProfile,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Ticket,
        EntityKind::Article,
        EntityKind::User,
        EntityKind::Organization,
        EntityKind::State,
        EntityKind::Group,
        EntityKind::Priority,
        EntityKind::ReportProfile,
    ];

    /// Tag used in logs and tool descriptions.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Ticket => "ticket",
            EntityKind::Article => "article",
            EntityKind::User => "user",
            EntityKind::Organization => "organization",
            EntityKind::State => "state",
            EntityKind::Group => "group",
            EntityKind::Priority => "priority",
            EntityKind::ReportProfile => "report_profile",
        }
    }

    /// Ordered allow-list of fields retained in compact mode.
    pub fn compact_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Ticket => &[
                "id",
                "number",
                "title",
                "state",
                "state_id",
                "priority",
                "priority_id",
                "group",
                "group_id",
                "customer_id",
                "owner_id",
                "organization_id",
                "created_at",
                "updated_at",
                "close_at",
                "tags",
            ],
            EntityKind::Article => &[
                "id",
                "ticket_id",
                "type",
                "sender",
                "from",
                "to",
                "subject",
                "body",
                "content_type",
                "internal",
                "created_at",
                "created_by_id",
            ],
            EntityKind::User => &[
                "id",
                "login",
                "firstname",
                "lastname",
                "email",
                "organization_id",
                "active",
                "created_at",
                "updated_at",
            ],
            EntityKind::Organization => {
                &["id", "name", "note", "active", "created_at", "updated_at"]
            }
            EntityKind::State => &["id", "name", "state_type", "active"],
            EntityKind::Group => &["id", "name", "active", "note"],
            EntityKind::Priority => &["id", "name", "active"],
            EntityKind::ReportProfile => &[
                "id",
                "name",
                "active",
                "condition",
                "created_at",
                "updated_at",
            ],
        }
    }

    /// Returns true if `field` holds free text that compact mode must keep.
    pub fn is_free_text(self, field: &str) -> bool {
        FREE_TEXT_FIELDS.contains(&field)
            || (self == EntityKind::ReportProfile && field == "condition")
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
