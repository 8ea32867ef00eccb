//! # pock-config
//!
//! TOML configuration types, loading, validation, and the widget layout file
//! for Pock. Depends only on `pock-paths`.

mod loading;
mod validation;

pub mod errors;
pub mod layout;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use layout::{WidgetEntry, WidgetLayout, load_layout};
pub use loading::{load_config_file, load_hierarchy, merge_configs};
pub use types::{
    DEFAULT_CHECK_TIMEOUT_SECS, DEFAULT_FEED_URL, DEFAULT_LAUNCH_DELAY_SECS,
    DEFAULT_UPDATE_INTERVAL_SECS, LoggingConfig, PermissionConfig, PockConfig, UpdatesConfig,
};
pub use validation::{MAX_UPDATE_INTERVAL_SECS, MIN_UPDATE_INTERVAL_SECS, validate_config};

impl PockConfig {
    /// Load configuration from `~/.pock/config.toml` merged over defaults.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load(paths: &pock_paths::PockPaths) -> Result<Self, ConfigError> {
        loading::load_hierarchy(paths)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// A copy with every optional field filled in with its effective value.
    ///
    /// Used for displaying the configuration that is actually in force.
    pub fn effective(&self) -> Self {
        Self {
            updates: UpdatesConfig {
                enabled: Some(self.updates.enabled()),
                interval_secs: Some(self.updates.interval_secs()),
                launch_check: Some(self.updates.launch_check()),
                launch_delay_secs: Some(self.updates.launch_delay_secs()),
                check_timeout_secs: Some(self.updates.check_timeout_secs().unwrap_or(0)),
                feed_url: Some(self.updates.feed_url().to_string()),
            },
            permission: PermissionConfig {
                prompt_on_launch: Some(self.permission.prompt_on_launch()),
            },
            logging: LoggingConfig {
                json: Some(self.logging.json()),
            },
        }
    }
}
