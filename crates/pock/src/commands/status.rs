use clap::ArgMatches;
use serde::Serialize;
use tracing::{info, warn};

use pock_core::InstanceStatus;
use pock_core::coordinator::status::read_status;
use pock_core::process::check_running;
use pock_paths::PockPaths;

use super::helpers::resolve_paths;

#[derive(Debug, Serialize)]
struct StatusOutput {
    running: bool,
    pid: Option<u32>,
    instance: Option<InstanceStatus>,
}

pub(crate) fn handle_status_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.status_started");

    let output = collect_status(&resolve_paths());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&output));
    }

    info!(event = "cli.status_completed", running = output.running);
    Ok(())
}

fn collect_status(paths: &PockPaths) -> StatusOutput {
    let Some(pid) = check_running(&paths.pid_file()) else {
        return StatusOutput {
            running: false,
            pid: None,
            instance: None,
        };
    };

    let instance = match read_status(&paths.status_file()) {
        // A file left by an earlier instance says nothing about this one.
        Ok(status) => status.filter(|s| s.pid == pid),
        Err(e) => {
            warn!(event = "cli.status.read_failed", error = %e);
            None
        }
    };

    StatusOutput {
        running: true,
        pid: Some(pid),
        instance,
    }
}

fn render_text(output: &StatusOutput) -> String {
    let Some(pid) = output.pid else {
        return "Pock: not running\n".to_string();
    };

    let mut text = format!("Pock: running (PID: {})\n", pid);
    let Some(instance) = &output.instance else {
        text.push_str("Status: not reported yet\n");
        return text;
    };

    let on_off = |on: bool| if on { "on" } else { "off" };
    text.push_str(&format!(
        "Accessibility permission: {}\n",
        if instance.permission_granted {
            "granted"
        } else {
            "not granted"
        }
    ));
    text.push_str(&format!(
        "Automatic updates: {}\n",
        on_off(instance.updates_enabled)
    ));
    match &instance.session {
        Some(session) => text.push_str(&format!(
            "Session: {} ({}) since {}\nWidgets: {}\n",
            session.id,
            session.provider,
            session.created_at,
            session.widgets.join(", ")
        )),
        None => text.push_str("Session: none (fix the layout and run `pock reload`)\n"),
    }
    text
}
