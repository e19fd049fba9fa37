//! The autotagging orchestrator.
//!
//! Drives one batch pass over all candidate tickets:
//! listing -> extraction -> tag merge -> write-back.
//!
//! Each stage fully materializes before the next begins.
//! TODO: stream tickets into extraction as listing pages arrive instead of
//! waiting for the full ticket set.

mod config;
mod options;
mod runner;
mod types;

pub use config::AutotaggerConfig;
pub use options::{default_tag_formatter, DescriptionFormatter, RunOptions, TagFormatter};
pub use runner::{merge_tags, Autotagger};
pub use types::{AutotagError, RunSummary, TaggedTicket};
