#[cfg(target_os = "macos")]
mod macos;
mod unsupported;

#[cfg(target_os = "macos")]
pub use macos::MacOsAccessibilityProbe;
pub use unsupported::UnsupportedPlatformProbe;

use super::traits::CapabilityProbe;

/// Probe for the platform this binary was built for.
pub fn platform_probe() -> Box<dyn CapabilityProbe> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacOsAccessibilityProbe)
    }

    #[cfg(not(target_os = "macos"))]
    {
        Box::new(UnsupportedPlatformProbe)
    }
}
