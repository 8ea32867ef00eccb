//! The single owner of session, scheduler and permission state.
//!
//! Everything that mutates a [`SessionController`] or an [`UpdateScheduler`]
//! runs on the task driving [`Coordinator::run`]. Background work (timer
//! ticks, remote checks, bus publishers) only ever sends messages to it.

pub mod errors;
pub mod status;

pub use errors::CoordinatorError;
pub use status::InstanceStatus;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pock_config::PockConfig;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::Signal;
use crate::permission::PermissionGate;
use crate::session::{PresentationHost, Session, SessionController, SessionError, SessionId};
use crate::shell::Shell;
use crate::updates::{
    NewVersionSink, SchedulerEvent, SchedulerSettings, UpdateScheduler, VersionChecker,
};

/// Startup behaviour taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    pub prompt_on_launch: bool,
    pub updates_enabled: bool,
    /// Delay of the one manual check after startup. `None` skips it.
    pub launch_check_delay: Option<Duration>,
    pub scheduler: SchedulerSettings,
}

impl CoordinatorSettings {
    pub fn from_config(config: &PockConfig) -> Self {
        let updates = &config.updates;
        Self {
            prompt_on_launch: config.permission.prompt_on_launch(),
            updates_enabled: updates.enabled(),
            launch_check_delay: updates
                .launch_check()
                .then(|| Duration::from_secs(updates.launch_delay_secs())),
            scheduler: SchedulerSettings::from_config(updates),
        }
    }
}

/// What startup found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartupReport {
    pub permission_granted: bool,
    pub session: Option<SessionId>,
}

pub struct Coordinator {
    gate: PermissionGate,
    sessions: SessionController,
    scheduler: UpdateScheduler,
    scheduler_events: mpsc::UnboundedReceiver<SchedulerEvent>,
    shell: Box<dyn Shell>,
    settings: CoordinatorSettings,
    permission_granted: bool,
    status_file: Option<PathBuf>,
}

impl Coordinator {
    pub fn new(
        gate: PermissionGate,
        host: Box<dyn PresentationHost>,
        checker: Arc<dyn VersionChecker>,
        sink: Box<dyn NewVersionSink>,
        shell: Box<dyn Shell>,
        settings: CoordinatorSettings,
    ) -> Self {
        let (scheduler, scheduler_events) = UpdateScheduler::new(checker, sink, settings.scheduler);
        Self {
            gate,
            sessions: SessionController::new(host),
            scheduler,
            scheduler_events,
            shell,
            settings,
            permission_granted: false,
            status_file: None,
        }
    }

    /// Keep `path` updated with [`InstanceStatus`] while running.
    pub fn with_status_file(mut self, path: PathBuf) -> Self {
        self.status_file = Some(path);
        self
    }

    pub fn sessions(&self) -> &SessionController {
        &self.sessions
    }

    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> CoordinatorSettings {
        self.settings
    }

    pub fn status(&self) -> InstanceStatus {
        InstanceStatus {
            pid: std::process::id(),
            permission_granted: self.permission_granted,
            updates_enabled: self.scheduler.is_enabled(),
            session: self.sessions.current_session().map(Session::snapshot),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Permission check, timer toggle, first session. In that order.
    ///
    /// Must be called from within a tokio runtime.
    pub fn startup(&mut self) -> StartupReport {
        info!(event = "core.coordinator.startup_started");

        // Advisory only: badges degrade without it.
        let permission_granted = self.gate.check(self.settings.prompt_on_launch);
        self.permission_granted = permission_granted;

        self.scheduler.set_enabled(self.settings.updates_enabled);

        // Failure is logged by the controller and is not fatal.
        let session = self.sessions.reload().ok();

        info!(
            event = "core.coordinator.startup_completed",
            permission_granted = permission_granted,
            updates_enabled = self.scheduler.is_enabled(),
            session = ?session,
        );
        self.publish_status();

        StartupReport {
            permission_granted,
            session,
        }
    }

    /// Apply one bus signal.
    pub fn handle_signal(&mut self, signal: Signal) {
        debug!(event = "core.coordinator.signal_received", signal = %signal);
        match signal {
            Signal::EnableAutomaticUpdatesChanged(on) => {
                self.scheduler.set_enabled(on);
                self.publish_status();
            }
            Signal::ReloadRequested => {
                let _ = self.sessions.reload();
                self.publish_status();
            }
            Signal::CustomizeRequested => {
                if let Err(e) = self.open_customization() {
                    warn!(event = "core.coordinator.customize_failed", error = %e);
                }
            }
        }
    }

    /// Apply one scheduler event, surfacing a newer release to the shell.
    pub fn handle_scheduler_event(&mut self, event: SchedulerEvent) {
        if self.scheduler.handle_event(event) {
            self.shell.open_preferences();
        }
    }

    /// Wait for the next scheduler event and apply it.
    ///
    /// Returns `false` only if the scheduler channel is closed.
    pub async fn pump_scheduler(&mut self) -> bool {
        match self.scheduler_events.recv().await {
            Some(event) => {
                self.handle_scheduler_event(event);
                true
            }
            None => false,
        }
    }

    /// "Customize…" menu action.
    pub fn open_customization(&self) -> Result<(), SessionError> {
        self.sessions.open_customization()
    }

    fn publish_status(&self) {
        let Some(path) = &self.status_file else {
            return;
        };
        if let Err(e) = status::write_status(path, &self.status()) {
            warn!(
                event = "core.coordinator.status_write_failed",
                path = %path.display(),
                error = %e,
            );
        }
    }

    /// Serve bus signals and scheduler events until `token` is cancelled or
    /// the bus closes. Call [`startup`](Self::startup) first.
    ///
    /// Subscribe `signals` before anything may publish. Teardown is left to
    /// [`shutdown`](Self::shutdown).
    pub async fn run(&mut self, mut signals: broadcast::Receiver<Signal>, token: CancellationToken) {
        let launch_delay = self.settings.launch_check_delay;
        let launch_check = tokio::time::sleep(launch_delay.unwrap_or_default());
        tokio::pin!(launch_check);
        let mut launch_pending = launch_delay.is_some();

        info!(event = "core.coordinator.run_started", launch_check = launch_pending);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!(event = "core.coordinator.run_cancelled");
                    break;
                }
                received = signals.recv() => match received {
                    Ok(signal) => self.handle_signal(signal),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            event = "core.coordinator.signals_lagged",
                            skipped = skipped,
                        );
                    }
                    Err(RecvError::Closed) => {
                        info!(event = "core.coordinator.bus_closed");
                        break;
                    }
                },
                Some(event) = self.scheduler_events.recv() => {
                    self.handle_scheduler_event(event);
                }
                _ = &mut launch_check, if launch_pending => {
                    launch_pending = false;
                    debug!(event = "core.coordinator.launch_check_started");
                    self.scheduler.check_once();
                }
            }
        }
    }

    /// Cancel the timer, dismiss the live session and remove the status file.
    ///
    /// An in-flight check is abandoned; its result has nowhere to go.
    pub fn shutdown(&mut self) {
        self.scheduler.set_enabled(false);
        let dismissed = self.sessions.dismiss_all();
        if let Some(path) = &self.status_file
            && let Err(e) = status::remove_status(path)
        {
            warn!(event = "core.coordinator.status_remove_failed", error = %e);
        }
        info!(
            event = "core.coordinator.shutdown_completed",
            dismissed = ?dismissed,
        );
    }
}
