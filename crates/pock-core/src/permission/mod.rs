//! Accessibility capability gate.
//!
//! Badge overlays need the OS accessibility capability. The grant is made by
//! the user in system settings, at any time and outside this process, so the
//! state is never cached: every [`PermissionGate::check`] asks the OS again.

pub mod backends;
pub mod traits;

pub use traits::CapabilityProbe;

use tracing::{debug, info};

/// One-shot, non-blocking capability check.
pub struct PermissionGate {
    probe: Box<dyn CapabilityProbe>,
}

impl PermissionGate {
    pub fn new(probe: Box<dyn CapabilityProbe>) -> Self {
        Self { probe }
    }

    /// Gate backed by the probe for the current platform.
    pub fn platform_default() -> Self {
        Self::new(backends::platform_probe())
    }

    pub fn probe_name(&self) -> &'static str {
        self.probe.name()
    }

    /// Query the capability.
    ///
    /// With `prompt_user` set and the capability missing, the OS may show a
    /// prompt. The returned value is still the state before the prompt; a
    /// grant only shows up on a later call.
    pub fn check(&self, prompt_user: bool) -> bool {
        debug!(
            event = "core.permission.check_started",
            probe = self.probe.name(),
            prompt = prompt_user,
        );

        let granted = self.probe.is_granted(prompt_user);

        info!(
            event = "core.permission.check_completed",
            probe = self.probe.name(),
            granted = granted,
            prompted = prompt_user && !granted,
        );

        granted
    }
}
