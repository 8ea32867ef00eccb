//! Configuration types for `~/.pock/config.toml`.
//!
//! Every field is optional in the file. Accessor methods resolve the
//! effective value against the built-in defaults, which keeps
//! [`crate::merge_configs`] able to tell "unset" from "explicitly set".

use serde::{Deserialize, Serialize};

/// Default period of the automatic update timer (24 hours).
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 86_400;

/// Default delay of the launch-time update check.
pub const DEFAULT_LAUNCH_DELAY_SECS: u64 = 1;

/// Default timeout applied to a single remote version check.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 30;

/// Default release feed queried by the version checker.
pub const DEFAULT_FEED_URL: &str = "https://pock.dev/api/latestRelease.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PockConfig {
    #[serde(default)]
    pub updates: UpdatesConfig,

    #[serde(default)]
    pub permission: PermissionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[updates]` section: automatic update checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatesConfig {
    /// Whether the recurring update timer is armed. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Timer period in seconds. Default: 86400.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Run one check shortly after startup regardless of `enabled`. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_check: Option<bool>,

    /// Delay of the launch check in seconds. Default: 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_delay_secs: Option<u64>,

    /// Per-check timeout in seconds, 0 disables it. Default: 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_timeout_secs: Option<u64>,

    /// Release feed URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
}

impl UpdatesConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.unwrap_or(DEFAULT_UPDATE_INTERVAL_SECS)
    }

    pub fn launch_check(&self) -> bool {
        self.launch_check.unwrap_or(true)
    }

    pub fn launch_delay_secs(&self) -> u64 {
        self.launch_delay_secs.unwrap_or(DEFAULT_LAUNCH_DELAY_SECS)
    }

    /// `None` when the timeout is disabled (`check_timeout_secs = 0`).
    pub fn check_timeout_secs(&self) -> Option<u64> {
        match self.check_timeout_secs.unwrap_or(DEFAULT_CHECK_TIMEOUT_SECS) {
            0 => None,
            secs => Some(secs),
        }
    }

    pub fn feed_url(&self) -> &str {
        self.feed_url.as_deref().unwrap_or(DEFAULT_FEED_URL)
    }

    /// Merge two sections. Values set in `override_config` win.
    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            enabled: override_config.enabled.or(base.enabled),
            interval_secs: override_config.interval_secs.or(base.interval_secs),
            launch_check: override_config.launch_check.or(base.launch_check),
            launch_delay_secs: override_config
                .launch_delay_secs
                .or(base.launch_delay_secs),
            check_timeout_secs: override_config
                .check_timeout_secs
                .or(base.check_timeout_secs),
            feed_url: override_config
                .feed_url
                .clone()
                .or_else(|| base.feed_url.clone()),
        }
    }
}

/// `[permission]` section: accessibility capability prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Ask the OS to prompt for the capability on launch. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_on_launch: Option<bool>,
}

impl PermissionConfig {
    pub fn prompt_on_launch(&self) -> bool {
        self.prompt_on_launch.unwrap_or(true)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            prompt_on_launch: override_config.prompt_on_launch.or(base.prompt_on_launch),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn json(&self) -> bool {
        self.json.unwrap_or(true)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            json: override_config.json.or(base.json),
        }
    }
}
