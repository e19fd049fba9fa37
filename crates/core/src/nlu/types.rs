//! Types for entity extraction results.

use serde::{Deserialize, Serialize};

/// One semantic entity recognized in a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// Category/slot name, e.g. "intent".
    pub key: String,
    /// Extracted value, e.g. "refund".
    pub value: String,
    /// Extraction confidence in [0, 1].
    pub confidence: f64,
}

impl Entity {
    pub fn new(key: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            confidence,
        }
    }
}
