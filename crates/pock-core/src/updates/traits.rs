use futures::future::BoxFuture;

use super::errors::UpdateError;
use super::types::UpdateCheckResult;

/// Remote "is there a newer version" query.
pub trait VersionChecker: Send + Sync {
    /// Resolve to `Some` only when a strictly newer release exists.
    ///
    /// The returned future must not borrow `self`; it is driven on a
    /// background task.
    fn fetch_latest_version(
        &self,
    ) -> BoxFuture<'static, Result<Option<UpdateCheckResult>, UpdateError>>;
}

/// Receives every positive check result, once each.
pub trait NewVersionSink: Send {
    fn new_version_available(&mut self, result: &UpdateCheckResult);
}
