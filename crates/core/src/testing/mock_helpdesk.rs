//! Mock helpdesk for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::helpdesk::{HelpdeskError, Ticket, TicketSink, TicketSource};

/// A recorded tag update for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    /// The ticket that was updated.
    pub ticket_id: u64,
    /// The tag set that was written.
    pub tags: Vec<String>,
}

/// Mock implementation of `TicketSource` and `TicketSink`.
///
/// Provides controllable behavior for testing:
/// - Serve configurable result pages
/// - Track page requests and tag updates for assertions
/// - Simulate page and update failures
#[derive(Debug, Default)]
pub struct MockHelpdesk {
    /// Result pages served in order; pages beyond the configured set are empty.
    pages: Arc<RwLock<Vec<Vec<Ticket>>>>,
    /// Pages requested, in request order.
    page_requests: Arc<RwLock<Vec<u32>>>,
    /// If set, fetching this page number fails.
    fail_on_page: Arc<RwLock<Option<u32>>>,
    /// Recorded tag updates.
    updates: Arc<RwLock<Vec<RecordedUpdate>>>,
    /// Ticket ids whose updates fail.
    failing_updates: Arc<RwLock<HashSet<u64>>>,
}

impl MockHelpdesk {
    /// Create a new mock helpdesk with no tickets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result pages served by `fetch_page`.
    pub async fn set_pages(&self, pages: Vec<Vec<Ticket>>) {
        *self.pages.write().await = pages;
    }

    /// Serve all tickets on a single page.
    pub async fn set_tickets(&self, tickets: Vec<Ticket>) {
        self.set_pages(vec![tickets]).await;
    }

    /// Make fetching the given page number fail.
    pub async fn fail_on_page(&self, page: u32) {
        *self.fail_on_page.write().await = Some(page);
    }

    /// Make updates for the given ticket id fail.
    pub async fn fail_update_for(&self, ticket_id: u64) {
        self.failing_updates.write().await.insert(ticket_id);
    }

    /// Pages requested so far, in order.
    pub async fn recorded_page_requests(&self) -> Vec<u32> {
        self.page_requests.read().await.clone()
    }

    /// Tag updates recorded so far.
    pub async fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.read().await.clone()
    }

    /// Number of updates recorded.
    pub async fn update_count(&self) -> usize {
        self.updates.read().await.len()
    }

    /// The recorded update for one ticket, if any.
    pub async fn update_for(&self, ticket_id: u64) -> Option<RecordedUpdate> {
        self.updates
            .read()
            .await
            .iter()
            .find(|u| u.ticket_id == ticket_id)
            .cloned()
    }
}

#[async_trait]
impl TicketSource for MockHelpdesk {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Ticket>, HelpdeskError> {
        self.page_requests.write().await.push(page);

        if *self.fail_on_page.read().await == Some(page) {
            return Err(HelpdeskError::ApiError {
                status: 500,
                message: format!("injected failure on page {}", page),
            });
        }

        // Pages are 1-indexed; page 0 (and anything past the configured
        // set) is served as empty rather than panicking on underflow.
        let pages = self.pages.read().await;
        Ok(page
            .checked_sub(1)
            .and_then(|idx| pages.get(idx as usize))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TicketSink for MockHelpdesk {
    async fn update_ticket_tags(&self, id: u64, tags: &[String]) -> Result<(), HelpdeskError> {
        if self.failing_updates.read().await.contains(&id) {
            return Err(HelpdeskError::ApiError {
                status: 500,
                message: format!("injected update failure for ticket {}", id),
            });
        }

        self.updates.write().await.push(RecordedUpdate {
            ticket_id: id,
            tags: tags.to_vec(),
        });
        Ok(())
    }
}
