//! Autotagger configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the autotagging orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutotaggerConfig {
    /// Maximum concurrent entity-extraction calls during a run.
    #[serde(default = "default_extraction_concurrency")]
    pub max_concurrent_extractions: usize,

    /// Maximum concurrent ticket updates during write-back.
    #[serde(default = "default_update_concurrency")]
    pub max_concurrent_updates: usize,
}

fn default_extraction_concurrency() -> usize {
    8
}

fn default_update_concurrency() -> usize {
    8
}

impl Default for AutotaggerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_extractions: default_extraction_concurrency(),
            max_concurrent_updates: default_update_concurrency(),
        }
    }
}
