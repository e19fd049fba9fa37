//! Types for the autotagging orchestrator.

use serde::Serialize;
use thiserror::Error;

use crate::helpdesk::{HelpdeskError, Ticket};
use crate::nlu::{Entity, NluError};

/// Errors that can fail an autotagging run.
///
/// Per-ticket extraction failures are not represented here: they are isolated
/// at the orchestrator boundary, logged, and degraded to an empty entity set.
/// Listing and write-back failures are fatal to the run.
#[derive(Debug, Error)]
pub enum AutotagError {
    /// Configuration invalid or incomplete.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Helpdesk client could not be constructed.
    #[error("helpdesk client error: {0}")]
    Helpdesk(#[from] HelpdeskError),

    /// Extractor client could not be constructed, or a per-call threshold
    /// override was out of range.
    #[error("extractor error: {0}")]
    Extractor(#[from] NluError),

    /// Ticket listing failed; no partial list is processed.
    #[error("failed to list tickets: {0}")]
    Listing(#[source] HelpdeskError),

    /// Write-back failed for a ticket. Tickets already updated in the same
    /// batch are not rolled back.
    #[error("failed to update tags for ticket {ticket_id}: {source}")]
    WriteBack {
        ticket_id: u64,
        #[source]
        source: HelpdeskError,
    },

    /// The run was cancelled externally.
    #[error("run cancelled")]
    Cancelled,
}

/// A ticket paired with the entities extracted from its description.
///
/// Exists only within a run; never persisted.
#[derive(Debug, Clone)]
pub struct TaggedTicket {
    pub ticket: Ticket,
    pub entities: Vec<Entity>,
    /// True when extraction failed for this ticket and the entity set was
    /// degraded to empty.
    pub extraction_failed: bool,
}

/// Outcome of a completed autotagging run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Tickets listed and written back.
    pub tickets_processed: usize,
    /// Tickets whose extraction failed and was degraded to zero entities.
    pub extraction_failures: usize,
    /// New tags added across all tickets (existing tags excluded).
    pub tags_added: usize,
}
