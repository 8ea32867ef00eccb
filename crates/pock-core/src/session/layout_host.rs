//! Default presentation host: builds the widget strip from `widgets.toml`.

use std::path::{Path, PathBuf};

use pock_config::load_layout;
use tracing::{debug, info};

use super::errors::SessionError;
use super::traits::{ContentProvider, PresentationHost};

/// Reads the widget layout afresh on every provider construction, so a
/// reload picks up edits to the file.
pub struct LayoutHost {
    layout_path: PathBuf,
}

impl LayoutHost {
    pub fn new(layout_path: PathBuf) -> Self {
        Self { layout_path }
    }

    pub fn layout_path(&self) -> &Path {
        &self.layout_path
    }
}

impl PresentationHost for LayoutHost {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn create_root_content_provider(&mut self) -> Result<Box<dyn ContentProvider>, SessionError> {
        let layout = load_layout(&self.layout_path)?;
        let widgets = layout.enabled_ids();

        info!(
            event = "core.session.provider_built",
            path = %self.layout_path.display(),
            widgets = widgets.len(),
        );

        Ok(Box::new(WidgetStrip {
            widgets,
            layout_path: self.layout_path.clone(),
            dismissed: false,
        }))
    }
}

/// Root provider presenting the enabled widgets in layout order.
pub struct WidgetStrip {
    widgets: Vec<String>,
    layout_path: PathBuf,
    dismissed: bool,
}

impl ContentProvider for WidgetStrip {
    fn describe(&self) -> String {
        format!("widget strip [{}]", self.widgets.join(", "))
    }

    fn widget_ids(&self) -> Vec<String> {
        self.widgets.clone()
    }

    fn dismiss(&mut self) {
        if self.dismissed {
            return;
        }
        self.dismissed = true;
        debug!(event = "core.session.provider_dismissed", widgets = self.widgets.len());
    }

    /// Customization means editing the layout file.
    fn open_customization(&self) -> Result<(), SessionError> {
        info!(
            event = "core.session.customize_open_started",
            path = %self.layout_path.display(),
        );
        open::that(&self.layout_path).map_err(|e| SessionError::CustomizationFailed {
            message: format!("{}: {}", self.layout_path.display(), e),
        })?;
        info!(event = "core.session.customize_open_completed");
        Ok(())
    }
}
