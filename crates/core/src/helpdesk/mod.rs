//! Helpdesk integration: the ticket source and sink the autotagger drives.
//!
//! `TicketSource` materializes the complete set of non-closed tickets by
//! paginating until the backing service returns an empty page. `TicketSink`
//! writes merged tag sets back. `ZendeskClient` implements both over the
//! Zendesk REST API.

mod types;
mod zendesk;

pub use crate::config::ZendeskConfig;
pub use types::Ticket;
pub use zendesk::ZendeskClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::metrics;

/// Errors that can occur when talking to the helpdesk.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing credentials, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for reading candidate tickets from a helpdesk.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetch a single result page (1-indexed).
    ///
    /// An empty page signals that there are no further results.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Ticket>, HelpdeskError>;

    /// List every candidate ticket, fully materialized.
    ///
    /// Pages are requested strictly sequentially until one comes back empty;
    /// results are concatenated in the service's order. A failure on any page
    /// aborts the whole listing, so callers never see a partial list.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, HelpdeskError> {
        let mut tickets = Vec::new();
        let mut page = 1u32;
        loop {
            let results = self.fetch_page(page).await?;
            metrics::LIST_PAGES_FETCHED.inc();
            if results.is_empty() {
                break;
            }
            tickets.extend(results);
            page += 1;
        }
        Ok(tickets)
    }
}

/// Trait for writing ticket tag updates back to a helpdesk.
#[async_trait]
pub trait TicketSink: Send + Sync {
    /// Replace the tag set on the ticket with the given id.
    async fn update_ticket_tags(&self, id: u64, tags: &[String]) -> Result<(), HelpdeskError>;
}
