use std::sync::Arc;
use std::time::Duration;

use pock_config::UpdatesConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::traits::{NewVersionSink, VersionChecker};
use super::types::{CheckStart, SchedulerEvent, UpdateCheckResult};

/// Timer cadence and check hardening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub interval: Duration,
    /// Upper bound on one remote check. `None` lets a hung check hold the
    /// single-flight slot until it returns.
    pub check_timeout: Option<Duration>,
}

impl SchedulerSettings {
    pub fn from_config(config: &UpdatesConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs()),
            check_timeout: config.check_timeout_secs().map(Duration::from_secs),
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from_config(&UpdatesConfig::default())
    }
}

/// Recurring, single-flight update checks.
///
/// The scheduler never mutates itself from a background task. The timer and
/// every check report through the [`SchedulerEvent`] channel returned by
/// [`new`](Self::new); the owner feeds those back through
/// [`handle_event`](Self::handle_event).
pub struct UpdateScheduler {
    checker: Arc<dyn VersionChecker>,
    sink: Box<dyn NewVersionSink>,
    settings: SchedulerSettings,
    events: mpsc::UnboundedSender<SchedulerEvent>,
    enabled: bool,
    timer: Option<JoinHandle<()>>,
    in_flight: bool,
    timers_armed: u64,
}

impl UpdateScheduler {
    pub fn new(
        checker: Arc<dyn VersionChecker>,
        sink: Box<dyn NewVersionSink>,
        settings: SchedulerSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SchedulerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            checker,
            sink,
            settings,
            events,
            enabled: false,
            timer: None,
            in_flight: false,
            timers_armed: 0,
        };
        (scheduler, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Number of timers armed over the scheduler's lifetime.
    pub fn timers_armed(&self) -> u64 {
        self.timers_armed
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    /// Arm or cancel the recurring timer. Repeating the current value is a
    /// no-op. Cancelling leaves an in-flight check running.
    ///
    /// An interval that is zero or too large to schedule leaves the
    /// scheduler disabled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_enabled(&mut self, on: bool) {
        if on == self.enabled {
            debug!(
                event = "core.update.toggle_skipped",
                enabled = on,
                reason = "unchanged",
            );
            return;
        }

        if on {
            let period = self.settings.interval;
            let first_tick = Instant::now().checked_add(period).filter(|_| !period.is_zero());
            let Some(first_tick) = first_tick else {
                error!(
                    event = "core.update.timer_arm_failed",
                    interval_secs = period.as_secs(),
                    reason = "interval out of range",
                );
                return;
            };
            self.enabled = true;
            self.timer = Some(self.spawn_timer(first_tick));
            self.timers_armed += 1;
            info!(
                event = "core.update.timer_armed",
                interval_secs = self.settings.interval.as_secs(),
            );
        } else {
            self.enabled = false;
            if let Some(timer) = self.timer.take() {
                timer.abort();
            }
            info!(
                event = "core.update.timer_cancelled",
                in_flight = self.in_flight,
            );
        }
    }

    /// Start a remote check unless one is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn check_once(&mut self) -> CheckStart {
        if self.in_flight {
            debug!(
                event = "core.update.check_skipped",
                reason = "already in flight",
            );
            return CheckStart::AlreadyInFlight;
        }

        // The slot is claimed only once the checker has handed back a future.
        let check = self.checker.fetch_latest_version();
        self.in_flight = true;
        info!(event = "core.update.check_started");

        let events = self.events.clone();
        let limit = self.settings.check_timeout;

        tokio::spawn(async move {
            let mut task = tokio::spawn(check);

            let joined = match limit {
                Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        task.abort();
                        warn!(
                            event = "core.update.check_failed",
                            reason = "timeout",
                            timeout_secs = limit.as_secs(),
                        );
                        let _ = events.send(SchedulerEvent::CheckCompleted(None));
                        return;
                    }
                },
                None => task.await,
            };

            let outcome = match joined {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    warn!(event = "core.update.check_failed", error = %e);
                    None
                }
                Err(e) => {
                    warn!(
                        event = "core.update.check_failed",
                        reason = "task aborted or panicked",
                        error = %e,
                    );
                    None
                }
            };

            // Receiver gone means the owner is shutting down.
            let _ = events.send(SchedulerEvent::CheckCompleted(outcome));
        });

        CheckStart::Started
    }

    /// Apply a finished check: clear the single-flight slot, then forward a
    /// positive result to the sink. Returns `true` for a positive result.
    pub fn complete(&mut self, result: Option<UpdateCheckResult>) -> bool {
        self.in_flight = false;

        match result {
            Some(result) => {
                info!(
                    event = "core.update.check_completed",
                    version = %result.version_number,
                    download_url = %result.download_url,
                );
                self.sink.new_version_available(&result);
                true
            }
            None => {
                info!(event = "core.update.check_completed", version = "none");
                false
            }
        }
    }

    /// Dispatch one event from the scheduler channel. Returns `true` when a
    /// newer version was forwarded to the sink.
    pub fn handle_event(&mut self, event: SchedulerEvent) -> bool {
        match event {
            SchedulerEvent::TimerFired => {
                debug!(event = "core.update.timer_fired");
                self.check_once();
                false
            }
            SchedulerEvent::CheckCompleted(result) => self.complete(result),
        }
    }

    fn spawn_timer(&self, first_tick: Instant) -> JoinHandle<()> {
        let events = self.events.clone();
        let period = self.settings.interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(SchedulerEvent::TimerFired).is_err() {
                    break;
                }
            }
        })
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
