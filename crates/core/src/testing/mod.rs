//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits,
//! allowing full pipeline testing without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use autotagger_core::testing::{fixtures, MockExtractor, MockHelpdesk};
//!
//! let helpdesk = MockHelpdesk::new();
//! let extractor = MockExtractor::new();
//!
//! // Configure mock responses
//! helpdesk.set_pages(vec![vec![fixtures::ticket(1, "help", &[])]]).await;
//! extractor.respond_to("help", vec![fixtures::entity("intent", "support", 0.9)]).await;
//!
//! // Use with Autotagger...
//! ```

mod mock_extractor;
mod mock_helpdesk;

pub use mock_extractor::{MockExtractor, RecordedExtraction};
pub use mock_helpdesk::{MockHelpdesk, RecordedUpdate};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::helpdesk::Ticket;
    use crate::nlu::Entity;

    /// Create a test ticket with a description and existing tags.
    pub fn ticket(id: u64, description: &str, tags: &[&str]) -> Ticket {
        Ticket {
            id,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Create a test entity.
    pub fn entity(key: &str, value: &str, confidence: f64) -> Entity {
        Entity::new(key, value, confidence)
    }
}
