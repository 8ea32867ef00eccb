//! Background update checks.
//!
//! [`UpdateScheduler`] owns the recurring timer and the single-flight slot;
//! [`ReleaseFeedChecker`] is the default remote [`VersionChecker`].

pub mod errors;
pub mod feed;
pub mod scheduler;
pub mod traits;
pub mod types;

pub use errors::UpdateError;
pub use feed::ReleaseFeedChecker;
pub use scheduler::{SchedulerSettings, UpdateScheduler};
pub use traits::{NewVersionSink, VersionChecker};
pub use types::{CheckStart, SchedulerEvent, UpdateCheckResult};
