//! Autotagging pipeline implementation.
//!
//! Stage policies differ deliberately:
//! - Listing: fail-fast, no partial ticket list.
//! - Extraction: per-ticket isolation; a failure is logged and degraded to
//!   zero entities, the run continues.
//! - Merge: pure and synchronous, no suspension.
//! - Write-back: fail-fast; the first update error fails the run.

use std::collections::HashSet;
use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::helpdesk::{TicketSink, TicketSource, ZendeskClient};
use crate::metrics;
use crate::nlu::{validate_threshold, Entity, EntityExtractor, WitClient};

use super::options::{default_tag_formatter, RunOptions, TagFormatter};
use super::types::{AutotagError, RunSummary, TaggedTicket};
use super::AutotaggerConfig;

/// The autotagging orchestrator.
pub struct Autotagger {
    config: AutotaggerConfig,
    source: Arc<dyn TicketSource>,
    sink: Arc<dyn TicketSink>,
    extractor: Arc<dyn EntityExtractor>,
    tag_formatter: TagFormatter,
}

impl Autotagger {
    /// Create a new autotagger over the given collaborators.
    pub fn new(
        config: AutotaggerConfig,
        source: Arc<dyn TicketSource>,
        sink: Arc<dyn TicketSink>,
        extractor: Arc<dyn EntityExtractor>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            extractor,
            tag_formatter: default_tag_formatter(),
        }
    }

    /// Replace the construction-time tag formatter.
    pub fn with_tag_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.tag_formatter = Arc::new(formatter);
        self
    }

    /// Build an autotagger backed by the Zendesk and wit.ai clients.
    ///
    /// Validates the configuration up front; missing credentials or an
    /// out-of-range threshold fail here, never at call time.
    pub fn from_config(config: &Config) -> Result<Self, AutotagError> {
        crate::config::validate_config(config)?;

        let zendesk = Arc::new(ZendeskClient::new(config.zendesk.clone())?);
        let wit = Arc::new(WitClient::new(config.wit.clone())?);

        Ok(Self::new(
            config.autotagger.clone(),
            Arc::clone(&zendesk) as Arc<dyn TicketSource>,
            zendesk as Arc<dyn TicketSink>,
            wit as Arc<dyn EntityExtractor>,
        ))
    }

    /// Stages 1-2: list every candidate ticket and extract entities from each
    /// description, with bounded concurrency and per-ticket failure isolation.
    ///
    /// The result has one `TaggedTicket` per listed ticket, in listing order,
    /// regardless of individual extraction failures.
    pub async fn autotagged_descriptions(
        &self,
        options: &RunOptions,
    ) -> Result<Vec<TaggedTicket>, AutotagError> {
        // A bad per-run threshold is a configuration error; reject it before
        // any network call.
        if let Some(threshold) = options.min_confidence {
            validate_threshold(threshold).map_err(AutotagError::Extractor)?;
        }

        if options.cancel.is_cancelled() {
            return Err(AutotagError::Cancelled);
        }

        let mut tickets = self
            .source
            .list_tickets()
            .await
            .map_err(AutotagError::Listing)?;

        metrics::TICKETS_LISTED.inc_by(tickets.len() as u64);
        info!("Listed {} tickets for autotagging", tickets.len());

        if let Some(formatter) = &options.description_formatter {
            for ticket in &mut tickets {
                if let Some(description) = &ticket.description {
                    ticket.description = Some((*formatter)(description));
                }
            }
        }

        if options.cancel.is_cancelled() {
            return Err(AutotagError::Cancelled);
        }

        let min_confidence = options.min_confidence;
        let cancel = options.cancel.clone();
        let tagged: Vec<TaggedTicket> = stream::iter(tickets.into_iter().map(|ticket| {
            let extractor = Arc::clone(&self.extractor);
            let cancel = cancel.clone();
            async move {
                if cancel.is_cancelled() {
                    return TaggedTicket {
                        ticket,
                        entities: Vec::new(),
                        extraction_failed: false,
                    };
                }

                let text = ticket.description.clone().unwrap_or_default();
                match extractor.entities(&text, min_confidence).await {
                    Ok(entities) => {
                        metrics::ENTITIES_EXTRACTED.inc_by(entities.len() as u64);
                        debug!("Extracted {} entities for ticket {}", entities.len(), ticket.id);
                        TaggedTicket {
                            ticket,
                            entities,
                            extraction_failed: false,
                        }
                    }
                    // Extraction failures are isolated per ticket: log and
                    // degrade to zero entities, never abort the batch.
                    Err(e) => {
                        metrics::EXTRACTION_FAILURES.inc();
                        warn!("Entity extraction failed for ticket {}: {}", ticket.id, e);
                        TaggedTicket {
                            ticket,
                            entities: Vec::new(),
                            extraction_failed: true,
                        }
                    }
                }
            }
        }))
        .buffered(self.config.max_concurrent_extractions)
        .collect()
        .await;

        if options.cancel.is_cancelled() {
            return Err(AutotagError::Cancelled);
        }

        Ok(tagged)
    }

    /// The full batch pass: list, extract, merge tags, write back.
    ///
    /// Completes having attempted a write for every listed ticket, or fails
    /// with the listing or write-back error that aborted the run.
    pub async fn autotag_tickets(&self, options: &RunOptions) -> Result<RunSummary, AutotagError> {
        let result = self.run(options).await;
        let outcome = if result.is_ok() { "completed" } else { "failed" };
        metrics::RUNS_TOTAL.with_label_values(&[outcome]).inc();
        result
    }

    async fn run(&self, options: &RunOptions) -> Result<RunSummary, AutotagError> {
        let tagged = self.autotagged_descriptions(options).await?;

        let formatter = options
            .tag_formatter
            .clone()
            .unwrap_or_else(|| self.tag_formatter.clone());

        // Merge stage: pure, in-memory, no suspension.
        let mut summary = RunSummary {
            tickets_processed: tagged.len(),
            ..Default::default()
        };
        let mut tickets = Vec::with_capacity(tagged.len());
        for item in tagged {
            let TaggedTicket {
                mut ticket,
                entities,
                extraction_failed,
            } = item;
            if extraction_failed {
                summary.extraction_failures += 1;
            }
            let merged = merge_tags(&ticket.tags, &entities, &formatter);
            summary.tags_added += merged.len().saturating_sub(ticket.tags.len());
            ticket.tags = merged;
            tickets.push(ticket);
        }

        if options.cancel.is_cancelled() {
            return Err(AutotagError::Cancelled);
        }

        // Write-back stage: bounded fan-out, first failure aborts the run.
        // Tickets already updated are not rolled back.
        let cancel = options.cancel.clone();
        stream::iter(tickets.iter().map(|ticket| {
            let sink = Arc::clone(&self.sink);
            let cancel = cancel.clone();
            async move {
                if cancel.is_cancelled() {
                    return Err(AutotagError::Cancelled);
                }
                sink.update_ticket_tags(ticket.id, &ticket.tags)
                    .await
                    .map_err(|source| AutotagError::WriteBack {
                        ticket_id: ticket.id,
                        source,
                    })?;
                metrics::TICKETS_UPDATED.inc();
                Ok(())
            }
        }))
        .buffered(self.config.max_concurrent_updates)
        .try_collect::<Vec<()>>()
        .await?;

        info!(
            "Autotagging run complete: {} tickets, {} tags added, {} extraction failures",
            summary.tickets_processed, summary.tags_added, summary.extraction_failures
        );

        Ok(summary)
    }
}

/// Merge a ticket's existing tags with tags derived from extracted entities.
///
/// Existing tags come first, then entity tags in extraction order; duplicates
/// collapse on exact string equality with the first occurrence winning. A
/// pre-existing tag is never removed, and the merge is idempotent.
pub fn merge_tags(existing: &[String], entities: &[Entity], formatter: &TagFormatter) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + entities.len());
    let candidates = existing
        .iter()
        .cloned()
        .chain(entities.iter().map(|e| (*formatter)(&e.key, &e.value)));
    for tag in candidates {
        if seen.insert(tag.clone()) {
            merged.push(tag);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_existing_first_then_entity_tags() {
        let formatter = default_tag_formatter();
        let entities = vec![Entity::new("intent", "refund", 0.9)];
        let merged = merge_tags(&tags(&["vip"]), &entities, &formatter);
        assert_eq!(merged, tags(&["vip", "intent:refund"]));
    }

    #[test]
    fn test_merge_deduplicates_against_existing() {
        let formatter = default_tag_formatter();
        let entities = vec![
            Entity::new("intent", "refund", 0.9),
            Entity::new("intent", "refund", 0.8),
        ];
        let merged = merge_tags(&tags(&["vip", "intent:refund"]), &entities, &formatter);
        assert_eq!(merged, tags(&["vip", "intent:refund"]));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let formatter = default_tag_formatter();
        let entities = vec![
            Entity::new("intent", "refund", 0.9),
            Entity::new("product", "router", 0.7),
        ];
        let once = merge_tags(&tags(&["vip"]), &entities, &formatter);
        let twice = merge_tags(&once, &entities, &formatter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_never_removes_existing_tags() {
        let formatter = default_tag_formatter();
        let existing = tags(&["a", "b", "c"]);
        let merged = merge_tags(&existing, &[], &formatter);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_with_custom_formatter() {
        let formatter: TagFormatter = Arc::new(|k, v| format!("{}={}", k, v));
        let entities = vec![Entity::new("intent", "refund", 0.9)];
        let merged = merge_tags(&[], &entities, &formatter);
        assert_eq!(merged, tags(&["intent=refund"]));
    }
}
