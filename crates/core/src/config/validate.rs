use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Zendesk domain, account email and API token are non-empty
/// - wit.ai access token is non-empty
/// - Default confidence threshold lies in [0, 1]
/// - Concurrency limits are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Zendesk validation
    if config.zendesk.domain.is_empty() {
        return Err(ConfigError::ValidationError(
            "zendesk.domain cannot be empty".to_string(),
        ));
    }
    if config.zendesk.account_email.is_empty() {
        return Err(ConfigError::ValidationError(
            "zendesk.account_email cannot be empty".to_string(),
        ));
    }
    if config.zendesk.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "zendesk.api_key cannot be empty".to_string(),
        ));
    }

    // wit.ai validation
    if config.wit.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "wit.api_key cannot be empty".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.wit.min_confidence) {
        return Err(ConfigError::ValidationError(format!(
            "wit.min_confidence must be between 0 and 1, got {}",
            config.wit.min_confidence
        )));
    }

    // Autotagger validation
    if config.autotagger.max_concurrent_extractions == 0 {
        return Err(ConfigError::ValidationError(
            "autotagger.max_concurrent_extractions cannot be 0".to_string(),
        ));
    }
    if config.autotagger.max_concurrent_updates == 0 {
        return Err(ConfigError::ValidationError(
            "autotagger.max_concurrent_updates cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
[zendesk]
domain = "acme"
account_email = "ops@acme.example"
api_key = "zd-token"

[wit]
api_key = "wit-token"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        let config = valid_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_domain_fails() {
        let mut config = valid_config();
        config.zendesk.domain = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_wit_key_fails() {
        let mut config = valid_config();
        config.wit.api_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_threshold_out_of_range_fails() {
        let mut config = valid_config();
        config.wit.min_confidence = 1.5;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("min_confidence"));
    }

    #[test]
    fn test_validate_zero_concurrency_fails() {
        let mut config = valid_config();
        config.autotagger.max_concurrent_updates = 0;
        assert!(validate_config(&config).is_err());
    }
}
