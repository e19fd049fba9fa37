use serde::{Deserialize, Serialize};

use crate::autotagger::AutotaggerConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub zendesk: ZendeskConfig,
    pub wit: WitConfig,
    #[serde(default)]
    pub autotagger: AutotaggerConfig,
}

/// Zendesk helpdesk configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZendeskConfig {
    /// Zendesk subdomain, e.g. "acme" for acme.zendesk.com
    pub domain: String,
    /// Account email the API token belongs to
    pub account_email: String,
    /// Zendesk API token
    pub api_key: String,
    /// Base URL override (default: https://{domain}.zendesk.com/api/v2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// wit.ai entity extraction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WitConfig {
    /// wit.ai server access token
    pub api_key: String,
    /// Default minimum entity confidence, in [0, 1] (default: 0)
    #[serde(default)]
    pub min_confidence: f64,
    /// Base URL override (default: https://api.wit.ai)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for display/logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub zendesk: SanitizedZendeskConfig,
    pub wit: SanitizedWitConfig,
    pub autotagger: AutotaggerConfig,
}

/// Sanitized Zendesk config (API token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedZendeskConfig {
    pub domain: String,
    pub account_email: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized wit.ai config (access token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedWitConfig {
    pub api_key_configured: bool,
    pub min_confidence: f64,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            zendesk: SanitizedZendeskConfig {
                domain: config.zendesk.domain.clone(),
                account_email: config.zendesk.account_email.clone(),
                api_key_configured: !config.zendesk.api_key.is_empty(),
                timeout_secs: config.zendesk.timeout_secs,
            },
            wit: SanitizedWitConfig {
                api_key_configured: !config.wit.api_key.is_empty(),
                min_confidence: config.wit.min_confidence,
                timeout_secs: config.wit.timeout_secs,
            },
            autotagger: config.autotagger.clone(),
        }
    }
}
