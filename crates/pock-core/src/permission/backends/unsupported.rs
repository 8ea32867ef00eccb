use tracing::debug;

use crate::permission::traits::CapabilityProbe;

/// Platforms without an accessibility trust model. Never granted.
pub struct UnsupportedPlatformProbe;

impl CapabilityProbe for UnsupportedPlatformProbe {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn is_granted(&self, prompt_user: bool) -> bool {
        debug!(
            event = "core.permission.probe_unsupported",
            prompt = prompt_user,
        );
        false
    }
}
