//! Command lines that put a release banner on screen.

use crate::updates::UpdateCheckResult;

const APP_NAME: &str = "Pock";

/// Desktop notifier program native to the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyTool {
    /// Notification Center through AppleScript.
    Osascript,
    /// libnotify.
    NotifySend,
}

impl NotifyTool {
    /// The target's notifier, if it is on `PATH`.
    pub fn detect() -> Option<Self> {
        let tool = if cfg!(target_os = "macos") {
            Self::Osascript
        } else if cfg!(target_os = "linux") {
            Self::NotifySend
        } else {
            return None;
        };
        which::which(tool.program()).ok().map(|_| tool)
    }

    pub fn program(self) -> &'static str {
        match self {
            NotifyTool::Osascript => "osascript",
            NotifyTool::NotifySend => "notify-send",
        }
    }

    /// Arguments announcing `release`.
    pub fn release_args(self, release: &UpdateCheckResult) -> Vec<String> {
        let headline = format!("Version {} is available", release.version_number);
        match self {
            NotifyTool::Osascript => vec![
                "-e".to_string(),
                format!(
                    "display notification {} with title {} subtitle {}",
                    applescript_quote(&release.download_url),
                    applescript_quote(APP_NAME),
                    applescript_quote(&headline),
                ),
            ],
            NotifyTool::NotifySend => vec![
                format!("--app-name={APP_NAME}"),
                "--category=software.update".to_string(),
                "--urgency=low".to_string(),
                format!("{APP_NAME}: {headline}"),
                markup_escape(&release.download_url),
            ],
        }
    }
}

fn applescript_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// notify-send bodies are parsed as markup by most servers; feed URLs
/// routinely carry `&`.
fn markup_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
