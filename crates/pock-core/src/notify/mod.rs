//! Desktop banner announcing a newer release.
//!
//! Best-effort: a missing notifier or a failing one is logged, never
//! returned to the shell.

pub mod errors;
pub mod tool;

pub use errors::NotifyError;
pub use tool::NotifyTool;

use std::process::Command;

use tracing::{debug, info, warn};

use crate::updates::UpdateCheckResult;

/// Show a banner for `release` with the target's notifier.
///
/// Returns whether a banner was shown.
pub fn announce_release(release: &UpdateCheckResult) -> bool {
    let Some(tool) = NotifyTool::detect() else {
        debug!(
            event = "core.notify.announce_skipped",
            reason = "no notifier on PATH",
        );
        return false;
    };

    info!(
        event = "core.notify.announce_started",
        tool = tool.program(),
        version = %release.version_number,
    );

    match run_tool(tool, &tool.release_args(release)) {
        Ok(()) => {
            info!(event = "core.notify.announce_completed", tool = tool.program());
            true
        }
        Err(e) => {
            warn!(
                event = "core.notify.announce_failed",
                tool = tool.program(),
                error = %e,
            );
            false
        }
    }
}

fn run_tool(tool: NotifyTool, args: &[String]) -> Result<(), NotifyError> {
    let program = tool.program();
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| NotifyError::LaunchFailed { program, source })?;

    if output.status.success() {
        return Ok(());
    }
    Err(NotifyError::ToolFailed {
        program,
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
