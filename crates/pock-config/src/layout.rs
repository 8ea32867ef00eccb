//! Widget layout file (`~/.pock/widgets.toml`).
//!
//! The layout is re-read on every session reload so edits take effect on the
//! next rebuild. Unlike `config.toml`, a missing layout is an error: without
//! it there is nothing to present.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// One configured widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEntry {
    pub id: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Everything currently configured to show on the strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    #[serde(default, rename = "widget")]
    pub widgets: Vec<WidgetEntry>,
}

impl WidgetLayout {
    /// Ids of the enabled widgets, in file order.
    pub fn enabled_ids(&self) -> Vec<String> {
        self.widgets
            .iter()
            .filter(|w| w.enabled)
            .map(|w| w.id.clone())
            .collect()
    }

    /// Reject layouts with blank or duplicate ids, or nothing enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for widget in &self.widgets {
            let id = widget.id.trim();
            if id.is_empty() {
                return Err(ConfigError::InvalidConfiguration {
                    message: "widget id must not be empty".to_string(),
                });
            }
            if !seen.insert(id) {
                return Err(ConfigError::InvalidConfiguration {
                    message: format!("duplicate widget id '{}'", id),
                });
            }
        }

        if !self.widgets.iter().any(|w| w.enabled) {
            return Err(ConfigError::InvalidConfiguration {
                message: "widget layout has no enabled widgets".to_string(),
            });
        }

        Ok(())
    }
}

/// Load and validate the widget layout at `path`.
///
/// # Errors
///
/// `LayoutNotFound` when the file is missing, `ConfigParseError` for bad TOML,
/// `InvalidConfiguration` when validation fails.
pub fn load_layout(path: &Path) -> Result<WidgetLayout, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::LayoutNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let layout: WidgetLayout =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;
    layout.validate()?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_layout(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("widgets.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_layout_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_layout(
            dir.path(),
            r#"
[[widget]]
id = "dock"

[[widget]]
id = "status"
enabled = false

[[widget]]
id = "control-center"
"#,
        );

        let layout = load_layout(&path).unwrap();
        assert_eq!(layout.widgets.len(), 3);
        assert_eq!(layout.enabled_ids(), vec!["dock", "control-center"]);
    }

    #[test]
    fn test_load_layout_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_layout(&dir.path().join("widgets.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LayoutNotFound { .. }));
    }

    #[test]
    fn test_load_layout_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_layout(dir.path(), "[[widget]\nid = ");
        let err = load_layout(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_layout(dir.path(), "");
        let err = load_layout(&path).unwrap_err();
        assert!(err.to_string().contains("no enabled widgets"));
    }

    #[test]
    fn test_all_disabled_rejected() {
        let layout = WidgetLayout {
            widgets: vec![WidgetEntry {
                id: "dock".to_string(),
                enabled: false,
            }],
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_layout(
            dir.path(),
            "[[widget]]\nid = \"dock\"\n\n[[widget]]\nid = \"dock\"\n",
        );
        let err = load_layout(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate widget id 'dock'"));
    }

    #[test]
    fn test_blank_id_rejected() {
        let layout = WidgetLayout {
            widgets: vec![WidgetEntry {
                id: " ".to_string(),
                enabled: true,
            }],
        };
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }
}
