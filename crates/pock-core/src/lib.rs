//! # pock-core
//!
//! Session lifecycle and background-update coordination for Pock.
//!
//! The [`coordinator::Coordinator`] owns one [`session::SessionController`],
//! one [`updates::UpdateScheduler`] and a [`permission::PermissionGate`], and
//! reacts to [`events::Signal`]s delivered over a [`events::NotificationBus`].

pub mod coordinator;
pub mod errors;
pub mod events;
pub mod logging;
pub mod notify;
pub mod permission;
pub mod process;
pub mod session;
pub mod shell;
pub mod updates;
pub mod watch;

pub use coordinator::{
    Coordinator, CoordinatorError, CoordinatorSettings, InstanceStatus, StartupReport,
};
pub use errors::{PockError, PockResult};
pub use events::{LocalBus, NotificationBus, Signal};
pub use logging::{init_logging, init_logging_with_format};
pub use permission::{CapabilityProbe, PermissionGate};
pub use session::{
    ContentProvider, LayoutHost, PresentationHost, Session, SessionController, SessionError,
    SessionId, SessionSnapshot,
};
pub use shell::{DesktopShell, PreferencesPane, Shell};
pub use updates::{
    CheckStart, NewVersionSink, ReleaseFeedChecker, SchedulerEvent, SchedulerSettings,
    UpdateCheckResult, UpdateError, UpdateScheduler, VersionChecker,
};
