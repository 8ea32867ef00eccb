//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.pock/config.toml`
//! 3. **CLI arguments** - Command-line flags, merged by the caller (highest priority)

use std::fs;
use std::path::Path;

use pock_paths::PockPaths;
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{LoggingConfig, PermissionConfig, PockConfig, UpdatesConfig};
use crate::validation::validate_config;

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if the user file cannot be parsed or validation fails.
/// A missing config file is not an error.
pub fn load_hierarchy(paths: &PockPaths) -> Result<PockConfig, ConfigError> {
    let mut config = PockConfig::default();

    if let Some(user_config) = load_config_file(&paths.user_config())? {
        config = merge_configs(config, user_config);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<PockConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                event = "config.load.file_missing",
                path = %path.display(),
            );
            return Ok(None);
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config: PockConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    debug!(event = "config.load.file_completed", path = %path.display());
    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only if present.
pub fn merge_configs(base: PockConfig, override_config: PockConfig) -> PockConfig {
    PockConfig {
        updates: UpdatesConfig::merge(&base.updates, &override_config.updates),
        permission: PermissionConfig::merge(&base.permission, &override_config.permission),
        logging: LoggingConfig::merge(&base.logging, &override_config.logging),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths_in(dir: &Path) -> PockPaths {
        PockPaths::from_dir(dir.to_path_buf())
    }

    #[test]
    fn test_load_hierarchy_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_hierarchy(&paths_in(dir.path())).unwrap();
        assert_eq!(config, PockConfig::default());
    }

    #[test]
    fn test_load_hierarchy_reads_user_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[updates]\nenabled = false\nlaunch_delay_secs = 5\n",
        )
        .unwrap();

        let config = load_hierarchy(&paths_in(dir.path())).unwrap();
        assert!(!config.updates.enabled());
        assert_eq!(config.updates.launch_delay_secs(), 5);
        assert_eq!(config.updates.interval_secs(), 86_400);
    }

    #[test]
    fn test_load_hierarchy_parse_error_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[updates\nenabled = ").unwrap();

        let err = load_hierarchy(&paths_in(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_hierarchy_validation_error_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[updates]\ninterval_secs = 5\n",
        )
        .unwrap();

        let err = load_hierarchy(&paths_in(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_load_config_file_missing_returns_none() {
        let result = load_config_file(&PathBuf::from("/tmp/pock_test_missing_config.toml"));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_merge_configs_override_wins() {
        let base = PockConfig {
            updates: UpdatesConfig {
                enabled: Some(true),
                feed_url: Some("https://base.example/feed.json".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let over = PockConfig {
            updates: UpdatesConfig {
                enabled: Some(false),
                ..Default::default()
            },
            permission: PermissionConfig {
                prompt_on_launch: Some(false),
            },
            ..Default::default()
        };

        let merged = merge_configs(base, over);
        assert!(!merged.updates.enabled());
        assert_eq!(merged.updates.feed_url(), "https://base.example/feed.json");
        assert!(!merged.permission.prompt_on_launch());
        assert!(merged.logging.json());
    }
}
