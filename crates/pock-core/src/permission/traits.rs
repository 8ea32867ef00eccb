/// OS query for the accessibility capability.
pub trait CapabilityProbe: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Whether the capability is granted right now.
    ///
    /// `prompt_user` may trigger an OS prompt as a side effect when the
    /// capability is missing. Implementations never block on the user.
    fn is_granted(&self, prompt_user: bool) -> bool;
}
