use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use pock_core::PermissionGate;

#[derive(Debug, Serialize)]
struct PermissionOutput {
    probe: &'static str,
    granted: bool,
    prompted: bool,
}

pub(crate) fn handle_permission_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = matches.get_flag("prompt");
    let json_output = matches.get_flag("json");
    info!(event = "cli.permission_started", prompt = prompt);

    let gate = PermissionGate::platform_default();
    let granted = gate.check(prompt);
    let output = PermissionOutput {
        probe: gate.probe_name(),
        granted,
        prompted: prompt && !granted,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if granted {
        println!("Accessibility permission: granted");
    } else {
        println!("Accessibility permission: not granted");
        if output.prompted {
            println!("A system prompt may have opened. Run this command again after granting access.");
        } else {
            println!("Notification badges stay disabled. Use --prompt to request access.");
        }
    }

    info!(event = "cli.permission_completed", granted = granted);
    Ok(())
}
