use tracing::info;

use pock_core::process::ControlRequest;

use super::helpers::{report_failure, resolve_paths, signal_running_instance};

pub(crate) fn handle_reload_command() -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.reload_started");

    let paths = resolve_paths();
    let pid = signal_running_instance(&paths, ControlRequest::Reload)
        .map_err(|e| report_failure("cli.reload_failed", e))?;

    println!("Reload requested (PID: {})", pid);
    info!(event = "cli.reload_completed", pid = pid);
    Ok(())
}
