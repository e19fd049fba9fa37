//! wit.ai API client.
//!
//! The message endpoint returns, per recognized category, a list of
//! (value, confidence) pairs. Each pair is filtered against the effective
//! threshold independently; a category is never dropped wholesale.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::WitConfig;

use super::{validate_threshold, Entity, EntityExtractor, NluError};

/// wit.ai API client.
#[derive(Debug)]
pub struct WitClient {
    client: Client,
    base_url: String,
    api_key: String,
    min_confidence: f64,
}

impl WitClient {
    /// Create a new wit.ai client.
    ///
    /// Fails fast on a missing access token or an out-of-range default
    /// threshold.
    pub fn new(config: WitConfig) -> Result<Self, NluError> {
        if config.api_key.is_empty() {
            return Err(NluError::NotConfigured(
                "wit.ai access token is required".to_string(),
            ));
        }

        let min_confidence = validate_threshold(config.min_confidence)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.wit.ai".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            min_confidence,
        })
    }
}

#[async_trait]
impl EntityExtractor for WitClient {
    async fn entities(
        &self,
        text: &str,
        min_confidence: Option<f64>,
    ) -> Result<Vec<Entity>, NluError> {
        // Threshold problems are configuration errors; surface them before
        // deciding whether a request is needed at all.
        let threshold = match min_confidence {
            Some(value) => validate_threshold(value)?,
            None => self.min_confidence,
        };

        // Cost-avoidance short-circuit: nothing to extract from empty text.
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/message", self.base_url);

        debug!("wit.ai message: {} bytes, threshold={}", text.len(), threshold);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(NluError::NotConfigured(
                "Invalid wit.ai access token".to_string(),
            ));
        }
        if status == 429 {
            return Err(NluError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NluError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let message: WitMessageResponse = response.json().await.map_err(|e| {
            NluError::ParseError(format!("Failed to parse message response: {}", e))
        })?;

        let mut entities = Vec::new();
        for (key, values) in message.entities {
            for entity_value in values {
                let confidence = entity_value.confidence.unwrap_or(0.0);
                if confidence < threshold {
                    continue;
                }
                // A recognized entity without a value cannot become a tag.
                let Some(value) = entity_value.value else {
                    continue;
                };
                entities.push(Entity {
                    key: key.clone(),
                    value: json_value_to_string(value),
                    confidence,
                });
            }
        }

        Ok(entities)
    }
}

/// Entity values arrive as arbitrary JSON scalars; tags need strings.
fn json_value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

// ============================================================================
// wit.ai API Wire Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct WitMessageResponse {
    #[serde(default)]
    entities: BTreeMap<String, Vec<WitEntityValue>>,
}

#[derive(Debug, Deserialize)]
struct WitEntityValue {
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    confidence: Option<f64>,
}
