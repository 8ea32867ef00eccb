use tracing::info;

use pock_core::process::ControlRequest;

use super::helpers::{report_failure, resolve_paths, signal_running_instance};

pub(crate) fn handle_customize_command() -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.customize_started");

    let paths = resolve_paths();
    let pid = signal_running_instance(&paths, ControlRequest::Customize)
        .map_err(|e| report_failure("cli.customize_failed", e))?;

    println!("Customization requested (PID: {})", pid);
    println!(
        "Save {} to apply the new layout.",
        paths.widgets_file().display()
    );
    info!(event = "cli.customize_completed", pid = pid);
    Ok(())
}
