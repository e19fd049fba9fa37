//! Per-run options and formatter function values.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Formats an extracted entity into a tag string.
pub type TagFormatter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Rewrites a ticket description before extraction.
pub type DescriptionFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The default `key:value` tag format.
pub fn default_tag_formatter() -> TagFormatter {
    Arc::new(|key, value| format!("{}:{}", key, value))
}

/// Options for a single autotagging run. All fields are optional.
#[derive(Clone)]
pub struct RunOptions {
    /// Applied in place to every ticket description before extraction.
    pub description_formatter: Option<DescriptionFormatter>,
    /// Overrides the orchestrator's tag formatter for this run.
    pub tag_formatter: Option<TagFormatter>,
    /// Overrides the extractor's default confidence threshold for this run.
    /// Must lie in [0, 1]; an out-of-range value fails the run before any
    /// network call.
    pub min_confidence: Option<f64>,
    /// Cancels an in-flight run. Observed at stage boundaries and before
    /// each per-ticket operation.
    pub cancel: CancellationToken,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            description_formatter: None,
            tag_formatter: None,
            min_confidence: None,
            cancel: CancellationToken::new(),
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.description_formatter = Some(Arc::new(formatter));
        self
    }

    pub fn with_tag_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.tag_formatter = Some(Arc::new(formatter));
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl std::fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOptions")
            .field(
                "description_formatter",
                &self.description_formatter.as_ref().map(|_| "<fn>"),
            )
            .field("tag_formatter", &self.tag_formatter.as_ref().map(|_| "<fn>"))
            .field("min_confidence", &self.min_confidence)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_formatter_joins_with_colon() {
        let formatter = default_tag_formatter();
        assert_eq!(formatter("intent", "refund"), "intent:refund");
    }

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert!(options.description_formatter.is_none());
        assert!(options.tag_formatter.is_none());
        assert!(options.min_confidence.is_none());
        assert!(!options.cancel.is_cancelled());
    }

    #[test]
    fn test_builder() {
        let options = RunOptions::new()
            .with_tag_formatter(|k, v| format!("{}-{}", k, v))
            .with_min_confidence(0.7);
        assert_eq!(options.min_confidence, Some(0.7));
        let formatter = options.tag_formatter.unwrap();
        assert_eq!(formatter("a", "b"), "a-b");
    }
}
