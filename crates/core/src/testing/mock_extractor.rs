//! Mock entity extractor for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::nlu::{validate_threshold, Entity, EntityExtractor, NluError};

/// A recorded extraction call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedExtraction {
    /// The text that was submitted.
    pub text: String,
    /// The per-call threshold override, if any.
    pub min_confidence: Option<f64>,
}

/// Mock implementation of the `EntityExtractor` trait.
///
/// Provides controllable behavior for testing:
/// - Return canned entities per text, or a default set
/// - Track extraction calls for assertions
/// - Simulate failures for specific texts
///
/// The mock honors the extractor contract: empty text short-circuits, an
/// out-of-range override is rejected, and results are filtered against the
/// effective threshold.
#[derive(Debug, Default)]
pub struct MockExtractor {
    /// Canned entities keyed by exact text.
    responses: Arc<RwLock<HashMap<String, Vec<Entity>>>>,
    /// Entities returned for texts with no canned response.
    default_entities: Arc<RwLock<Vec<Entity>>>,
    /// Texts whose extraction fails.
    failing_texts: Arc<RwLock<HashSet<String>>>,
    /// Recorded extraction calls.
    calls: Arc<RwLock<Vec<RecordedExtraction>>>,
}

impl MockExtractor {
    /// Create a new mock extractor returning no entities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the given entities for an exact text.
    pub async fn respond_to(&self, text: &str, entities: Vec<Entity>) {
        self.responses.write().await.insert(text.to_string(), entities);
    }

    /// Return the given entities for any text without a canned response.
    pub async fn set_default_entities(&self, entities: Vec<Entity>) {
        *self.default_entities.write().await = entities;
    }

    /// Make extraction fail for an exact text.
    pub async fn fail_for(&self, text: &str) {
        self.failing_texts.write().await.insert(text.to_string());
    }

    /// Extraction calls recorded so far.
    pub async fn recorded_calls(&self) -> Vec<RecordedExtraction> {
        self.calls.read().await.clone()
    }

    /// Number of extraction calls recorded.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl EntityExtractor for MockExtractor {
    async fn entities(
        &self,
        text: &str,
        min_confidence: Option<f64>,
    ) -> Result<Vec<Entity>, NluError> {
        let threshold = match min_confidence {
            Some(value) => validate_threshold(value)?,
            None => 0.0,
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.calls.write().await.push(RecordedExtraction {
            text: text.to_string(),
            min_confidence,
        });

        if self.failing_texts.read().await.contains(text) {
            return Err(NluError::ApiError {
                status: 500,
                message: format!("injected extraction failure for: {}", text),
            });
        }

        let responses = self.responses.read().await;
        let entities = match responses.get(text) {
            Some(entities) => entities.clone(),
            None => self.default_entities.read().await.clone(),
        };

        Ok(entities
            .into_iter()
            .filter(|e| e.confidence >= threshold)
            .collect())
    }
}
