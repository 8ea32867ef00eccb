//! Status-menu side of the application.
//!
//! [`Shell`] is what the coordinator calls when a newer release should be
//! put in front of the user. [`PreferencesPane`] keeps the newest known
//! release and is the default [`NewVersionSink`].

use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::notify;
use crate::updates::{NewVersionSink, UpdateCheckResult};

pub trait Shell: Send {
    /// Bring the preferences UI forward.
    ///
    /// Failures are logged by the implementation, never returned.
    fn open_preferences(&mut self);
}

/// Preferences state shared between the sink and the shell.
#[derive(Debug, Clone, Default)]
pub struct PreferencesPane {
    new_version: Arc<Mutex<Option<UpdateCheckResult>>>,
}

impl PreferencesPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest release reported so far, if any.
    pub fn new_version(&self) -> Option<UpdateCheckResult> {
        self.new_version
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl NewVersionSink for PreferencesPane {
    fn new_version_available(&mut self, result: &UpdateCheckResult) {
        *self
            .new_version
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(result.clone());
    }
}

/// Announces releases with a desktop notification and opens the download page.
pub struct DesktopShell {
    preferences: PreferencesPane,
    open_download_page: bool,
}

impl DesktopShell {
    pub fn new(preferences: PreferencesPane) -> Self {
        Self {
            preferences,
            open_download_page: true,
        }
    }

    /// Only notify; leave the browser alone.
    pub fn without_browser(mut self) -> Self {
        self.open_download_page = false;
        self
    }
}

impl Shell for DesktopShell {
    fn open_preferences(&mut self) {
        let Some(release) = self.preferences.new_version() else {
            info!(
                event = "core.shell.preferences_open_skipped",
                reason = "no pending release",
            );
            return;
        };

        info!(
            event = "core.shell.preferences_open_started",
            version = %release.version_number,
        );

        notify::announce_release(&release);

        if !self.open_download_page {
            return;
        }

        let url = release.download_url.as_str();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            warn!(
                event = "core.shell.url_open_blocked",
                url = url,
                reason = "unsupported scheme, only http:// and https:// allowed",
            );
            return;
        }

        match open::that(url) {
            Ok(()) => info!(event = "core.shell.url_open_completed", url = url),
            Err(e) => error!(event = "core.shell.url_open_failed", url = url, error = %e),
        }
    }
}
