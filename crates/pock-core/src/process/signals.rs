//! Unix signal plumbing for `pock run`.
//!
//! SIGINT/SIGTERM stop the coordinator. SIGHUP asks it to rebuild the
//! session and SIGUSR1 to open the layout for editing.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::pid::signal_target;
use crate::coordinator::CoordinatorError;
use crate::events::{NotificationBus, Signal};

/// Wait for SIGTERM or SIGINT, then cancel `token`.
pub async fn wait_for_shutdown_signal(token: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {
                        info!(event = "core.process.signal_received", signal = "SIGINT");
                    }
                    _ = sigterm.recv() => {
                        info!(event = "core.process.signal_received", signal = "SIGTERM");
                    }
                    _ = token.cancelled() => return,
                }
            }
            Err(e) => {
                warn!(
                    event = "core.process.sigterm_register_failed",
                    error = %e,
                );
                tokio::select! {
                    _ = ctrl_c => {
                        info!(event = "core.process.signal_received", signal = "SIGINT");
                    }
                    _ = token.cancelled() => return,
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            _ = ctrl_c => {
                info!(event = "core.process.signal_received", signal = "SIGINT");
            }
            _ = token.cancelled() => return,
        }
    }

    token.cancel();
}

/// What another `pock` invocation can ask of the running instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Rebuild the widget strip (SIGHUP).
    Reload,
    /// Open the layout for editing (SIGUSR1).
    Customize,
}

impl ControlRequest {
    pub fn signal_name(self) -> &'static str {
        match self {
            ControlRequest::Reload => "SIGHUP",
            ControlRequest::Customize => "SIGUSR1",
        }
    }

    fn unix_signal(self) -> nix::sys::signal::Signal {
        match self {
            ControlRequest::Reload => nix::sys::signal::Signal::SIGHUP,
            ControlRequest::Customize => nix::sys::signal::Signal::SIGUSR1,
        }
    }

    fn bus_signal(self) -> Signal {
        match self {
            ControlRequest::Reload => Signal::ReloadRequested,
            ControlRequest::Customize => Signal::CustomizeRequested,
        }
    }
}

/// Installed SIGHUP and SIGUSR1 handlers.
///
/// Both signals terminate the process until a handler is installed, so
/// register before the pid file advertises this process. Signals that arrive
/// between registration and [`forward`](Self::forward) are kept.
#[cfg(unix)]
pub struct ControlSignals {
    hangup: tokio::signal::unix::Signal,
    user1: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ControlSignals {
    /// Must be called from within a tokio runtime.
    pub fn register() -> Result<Self, CoordinatorError> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            hangup: signal(SignalKind::hangup())?,
            user1: signal(SignalKind::user_defined1())?,
        })
    }

    /// Publish the matching [`Signal`] for every control signal until
    /// `token` is cancelled.
    pub async fn forward(mut self, bus: Arc<dyn NotificationBus>, token: CancellationToken) {
        loop {
            let request = tokio::select! {
                received = self.hangup.recv() => received.map(|()| ControlRequest::Reload),
                received = self.user1.recv() => received.map(|()| ControlRequest::Customize),
                _ = token.cancelled() => return,
            };
            let Some(request) = request else {
                warn!(event = "core.process.control_stream_closed");
                return;
            };
            info!(
                event = "core.process.signal_received",
                signal = request.signal_name(),
            );
            bus.publish(request.bus_signal());
        }
    }
}

#[cfg(not(unix))]
pub struct ControlSignals;

#[cfg(not(unix))]
impl ControlSignals {
    pub fn register() -> Result<Self, CoordinatorError> {
        Ok(Self)
    }

    pub async fn forward(self, _bus: Arc<dyn NotificationBus>, token: CancellationToken) {
        token.cancelled().await;
    }
}

/// Deliver `request` to the instance with `pid`.
pub fn send_control_request(pid: u32, request: ControlRequest) -> Result<(), CoordinatorError> {
    let target = signal_target(pid).ok_or_else(|| CoordinatorError::SignalFailed {
        pid,
        message: "not a single-process pid".to_string(),
    })?;

    nix::sys::signal::kill(target, request.unix_signal()).map_err(|e| {
        CoordinatorError::SignalFailed {
            pid,
            message: e.to_string(),
        }
    })?;
    info!(
        event = "core.process.control_signal_sent",
        pid = pid,
        signal = request.signal_name(),
    );
    Ok(())
}
