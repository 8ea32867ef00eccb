//! macOS accessibility trust check via `AXIsProcessTrustedWithOptions`.

use accessibility_sys::{AXIsProcessTrustedWithOptions, kAXTrustedCheckOptionPrompt};
use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;

use crate::permission::traits::CapabilityProbe;

pub struct MacOsAccessibilityProbe;

impl CapabilityProbe for MacOsAccessibilityProbe {
    fn name(&self) -> &'static str {
        "macos-accessibility"
    }

    fn is_granted(&self, prompt_user: bool) -> bool {
        // SAFETY: kAXTrustedCheckOptionPrompt is a constant CFStringRef owned by
        // the HIServices framework; get-rule wrapping retains it for our use.
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let value = if prompt_user {
            CFBoolean::true_value()
        } else {
            CFBoolean::false_value()
        };
        let options = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);

        // SAFETY: options is a valid CFDictionaryRef that outlives the call.
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_probe_name() {
        assert_eq!(MacOsAccessibilityProbe.name(), "macos-accessibility");
    }

    #[test]
    fn macos_probe_without_prompt_does_not_panic() {
        let _granted = MacOsAccessibilityProbe.is_granted(false);
    }
}
