//! Types for helpdesk ticket records.

use serde::{Deserialize, Serialize};

/// A support ticket as read from (and written back to) the helpdesk.
///
/// Only the fields the autotagger touches are modeled; anything else on the
/// wire record is ignored on read and untouched on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Helpdesk-assigned ticket id.
    pub id: u64,
    /// Free-text description, may be absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current tags on the ticket. Uniqueness is enforced on write, not read.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Ticket {
    /// Create a ticket with no description and no tags.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            description: None,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"id": 42}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 42);
        assert!(ticket.description.is_none());
        assert!(ticket.tags.is_empty());
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": 7,
            "description": "printer on fire",
            "tags": ["hardware"],
            "status": "open",
            "requester_id": 12345
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.description.as_deref(), Some("printer on fire"));
        assert_eq!(ticket.tags, vec!["hardware"]);
    }
}
