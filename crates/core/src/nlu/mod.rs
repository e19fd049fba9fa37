//! Entity extraction: recognizing (category, value, confidence) triples in
//! ticket descriptions.
//!
//! `WitClient` implements the `EntityExtractor` trait over the wit.ai message
//! endpoint. Extraction is a per-text leaf operation; there is no pagination
//! concern here.

mod types;
mod wit;

pub use crate::config::WitConfig;
pub use types::Entity;
pub use wit::WitClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during entity extraction.
#[derive(Debug, Error)]
pub enum NluError {
    /// Confidence threshold outside [0, 1]. A configuration error, raised
    /// before any network I/O.
    #[error("Confidence threshold {0} is not a value between 0 and 1")]
    InvalidThreshold(f64),

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

    /// Client not configured (missing access token, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for entity extraction backends.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Extract entities from `text` whose confidence meets the effective
    /// threshold: a valid per-call override wins over the instance default.
    ///
    /// Empty text returns an empty list without issuing a request.
    async fn entities(
        &self,
        text: &str,
        min_confidence: Option<f64>,
    ) -> Result<Vec<Entity>, NluError>;
}

/// Ensure a confidence threshold lies in [0, 1] inclusive.
pub fn validate_threshold(threshold: f64) -> Result<f64, NluError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(NluError::InvalidThreshold(threshold));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_threshold_accepts_bounds() {
        assert_eq!(validate_threshold(0.0).unwrap(), 0.0);
        assert_eq!(validate_threshold(1.0).unwrap(), 1.0);
        assert_eq!(validate_threshold(0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_validate_threshold_rejects_out_of_range() {
        assert!(matches!(
            validate_threshold(-0.1),
            Err(NluError::InvalidThreshold(_))
        ));
        assert!(matches!(
            validate_threshold(1.1),
            Err(NluError::InvalidThreshold(_))
        ));
        assert!(validate_threshold(f64::NAN).is_err());
    }
}
