use super::errors::SessionError;

/// Root object of a presentation: everything currently configured to show.
pub trait ContentProvider: Send {
    /// Human-readable summary for logs and status output.
    fn describe(&self) -> String;

    /// Widget ids presented by this provider, in order.
    fn widget_ids(&self) -> Vec<String>;

    /// Release everything this provider holds on the strip.
    ///
    /// Called exactly once, before the provider is dropped.
    fn dismiss(&mut self);

    /// Open the customization UI for this root.
    fn open_customization(&self) -> Result<(), SessionError>;
}

/// Collaborator that builds root content providers.
pub trait PresentationHost: Send {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Build a fresh root content provider from the current configuration.
    fn create_root_content_provider(&mut self) -> Result<Box<dyn ContentProvider>, SessionError>;
}
