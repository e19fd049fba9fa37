//! Prometheus metrics for the autotagging pipeline.
//!
//! Covers listing, extraction, write-back, and run outcomes.

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

/// Result pages fetched while listing tickets.
pub static LIST_PAGES_FETCHED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autotagger_list_pages_fetched_total",
        "Total ticket result pages fetched",
    )
    .unwrap()
});

/// Tickets listed for autotagging.
pub static TICKETS_LISTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autotagger_tickets_listed_total",
        "Total tickets listed for autotagging",
    )
    .unwrap()
});

/// Entities extracted above the confidence threshold.
pub static ENTITIES_EXTRACTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autotagger_entities_extracted_total",
        "Total entities extracted above the confidence threshold",
    )
    .unwrap()
});

/// Per-ticket extraction failures that were isolated and degraded.
pub static EXTRACTION_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autotagger_extraction_failures_total",
        "Total per-ticket extraction failures degraded to zero entities",
    )
    .unwrap()
});

/// Tickets whose tags were written back.
pub static TICKETS_UPDATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autotagger_tickets_updated_total",
        "Total tickets with tags written back",
    )
    .unwrap()
});

/// Autotagging runs by outcome.
pub static RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autotagger_runs_total", "Total autotagging runs"),
        &["result"], // "completed", "failed"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(LIST_PAGES_FETCHED.clone()),
        Box::new(TICKETS_LISTED.clone()),
        Box::new(ENTITIES_EXTRACTED.clone()),
        Box::new(EXTRACTION_FAILURES.clone()),
        Box::new(TICKETS_UPDATED.clone()),
        Box::new(RUNS_TOTAL.clone()),
    ]
}
