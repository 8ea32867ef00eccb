use serde::{Deserialize, Serialize};

/// A newer release than the running one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckResult {
    pub version_number: String,
    pub download_url: String,
}

impl UpdateCheckResult {
    pub fn new(version_number: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            version_number: version_number.into(),
            download_url: download_url.into(),
        }
    }
}

/// Messages marshalled back to the scheduler's owner.
///
/// Both originate on background tasks; the owner applies them to scheduler
/// state via [`super::UpdateScheduler::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    TimerFired,
    /// A remote check finished. `None` covers "no newer version" as well as
    /// failure, timeout and a panicking check task.
    CheckCompleted(Option<UpdateCheckResult>),
}

/// Outcome of asking for a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStart {
    Started,
    AlreadyInFlight,
}
