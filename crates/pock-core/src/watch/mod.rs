//! File watcher for `~/.pock/`.
//!
//! Edits to `widgets.toml` become [`Signal::ReloadRequested`]; edits to
//! `config.toml` re-read the configuration and republish the automatic
//! updates preference as [`Signal::EnableAutomaticUpdatesChanged`].

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use pock_config::PockConfig;
use pock_paths::{CONFIG_FILE_NAME, PockPaths, WIDGETS_FILE_NAME};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::coordinator::CoordinatorError;
use crate::events::{NotificationBus, Signal};

/// How often the async bridge drains watcher events.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Which watched files changed since the last drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub config: bool,
    pub layout: bool,
}

impl PendingChanges {
    pub fn is_empty(&self) -> bool {
        !self.config && !self.layout
    }
}

pub struct ConfigWatcher {
    /// Must be kept alive for events to flow.
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
}

impl ConfigWatcher {
    /// Watch `dir` (non-recursively). The directory is created if missing.
    pub fn new(dir: &Path) -> Result<Self, CoordinatorError> {
        std::fs::create_dir_all(dir)?;

        let (tx, rx) = mpsc::channel();
        let watch_failed = |e: notify::Error| CoordinatorError::WatchFailed {
            path: dir.display().to_string(),
            message: e.to_string(),
        };
        let mut watcher = notify::recommended_watcher(tx).map_err(watch_failed)?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(watch_failed)?;

        info!(event = "core.watch.started", path = %dir.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Drain every pending event (non-blocking).
    pub fn drain(&self) -> PendingChanges {
        let mut changes = PendingChanges::default();

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    let Some(file) = Self::classify(&event) else {
                        continue;
                    };
                    debug!(
                        event = "core.watch.event_detected",
                        kind = ?event.kind,
                        file = ?file,
                    );
                    match file {
                        WatchedFile::Config => changes.config = true,
                        WatchedFile::Layout => changes.layout = true,
                    }
                }
                Ok(Err(e)) => {
                    warn!(event = "core.watch.event_error", error = %e);
                }
                Err(TryRecvError::Empty) => return changes,
                Err(TryRecvError::Disconnected) => {
                    warn!(event = "core.watch.channel_disconnected");
                    return changes;
                }
            }
        }
    }

    /// Map an event to the watched file it touches, if any.
    fn classify(event: &Event) -> Option<WatchedFile> {
        let is_relevant_kind = matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        );
        if !is_relevant_kind {
            return None;
        }

        event.paths.iter().find_map(|p| {
            match p.file_name().and_then(|n| n.to_str()) {
                Some(CONFIG_FILE_NAME) => Some(WatchedFile::Config),
                Some(WIDGETS_FILE_NAME) => Some(WatchedFile::Layout),
                _ => None,
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchedFile {
    Config,
    Layout,
}

/// Turn drained changes into bus signals.
///
/// A configuration that fails to load or validate is logged and skipped; the
/// running state keeps its previous preference.
pub fn publish_changes(changes: PendingChanges, paths: &PockPaths, bus: &dyn NotificationBus) {
    if changes.config {
        match PockConfig::load(paths).and_then(|config| {
            config.validate()?;
            Ok(config)
        }) {
            Ok(config) => {
                let enabled = config.updates.enabled();
                info!(event = "core.watch.config_reloaded", updates_enabled = enabled);
                bus.publish(Signal::EnableAutomaticUpdatesChanged(enabled));
            }
            Err(e) => {
                warn!(event = "core.watch.config_reload_failed", error = %e);
            }
        }
    }

    if changes.layout {
        bus.publish(Signal::ReloadRequested);
    }
}

/// Poll `watcher` until `token` is cancelled, publishing as changes arrive.
pub async fn run_watch_loop(
    watcher: ConfigWatcher,
    paths: PockPaths,
    bus: Arc<dyn NotificationBus>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let changes = watcher.drain();
                if !changes.is_empty() {
                    publish_changes(changes, &paths, bus.as_ref());
                }
            }
            _ = token.cancelled() => {
                debug!(event = "core.watch.stopped");
                return;
            }
        }
    }
}
