//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::PockConfig;

/// Smallest accepted update timer period.
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 60;

/// Largest accepted update timer period (one year).
pub const MAX_UPDATE_INTERVAL_SECS: u64 = 365 * 86_400;

/// Validate a PockConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `updates.interval_secs` must be within
///   [`MIN_UPDATE_INTERVAL_SECS`]..=[`MAX_UPDATE_INTERVAL_SECS`]
/// - `updates.feed_url` must be a non-empty `http://` or `https://` URL
pub fn validate_config(config: &PockConfig) -> Result<(), ConfigError> {
    let interval = config.updates.interval_secs();
    if interval < MIN_UPDATE_INTERVAL_SECS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "updates.interval_secs must be >= {} (got {})",
                MIN_UPDATE_INTERVAL_SECS, interval
            ),
        });
    }
    if interval > MAX_UPDATE_INTERVAL_SECS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "updates.interval_secs must be <= {} (got {})",
                MAX_UPDATE_INTERVAL_SECS, interval
            ),
        });
    }

    let feed_url = config.updates.feed_url().trim();
    if feed_url.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "updates.feed_url must not be empty".to_string(),
        });
    }
    if !(feed_url.starts_with("https://") || feed_url.starts_with("http://")) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "updates.feed_url must start with http:// or https:// (got '{}')",
                feed_url
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpdatesConfig;

    fn with_updates(updates: UpdatesConfig) -> PockConfig {
        PockConfig {
            updates,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&PockConfig::default()).is_ok());
    }

    #[test]
    fn test_short_interval_rejected() {
        let config = with_updates(UpdatesConfig {
            interval_secs: Some(59),
            ..Default::default()
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }

    #[test]
    fn test_min_interval_accepted() {
        let config = with_updates(UpdatesConfig {
            interval_secs: Some(MIN_UPDATE_INTERVAL_SECS),
            ..Default::default()
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_huge_interval_rejected() {
        for interval in [MAX_UPDATE_INTERVAL_SECS + 1, u64::MAX] {
            let config = with_updates(UpdatesConfig {
                interval_secs: Some(interval),
                ..Default::default()
            });
            let err = validate_config(&config).unwrap_err();
            assert!(err.to_string().contains("must be <="));
        }
    }

    #[test]
    fn test_max_interval_accepted() {
        let config = with_updates(UpdatesConfig {
            interval_secs: Some(MAX_UPDATE_INTERVAL_SECS),
            ..Default::default()
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_feed_url_rejected() {
        let config = with_updates(UpdatesConfig {
            feed_url: Some("  ".to_string()),
            ..Default::default()
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_non_http_feed_url_rejected() {
        let config = with_updates(UpdatesConfig {
            feed_url: Some("ftp://example.com/feed".to_string()),
            ..Default::default()
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_http_feed_url_accepted() {
        let config = with_updates(UpdatesConfig {
            feed_url: Some("http://localhost:8080/latest.json".to_string()),
            ..Default::default()
        });
        assert!(validate_config(&config).is_ok());
    }
}
