use clap::ArgMatches;
use tracing::error;

mod check_update;
mod config;
mod customize;
mod helpers;
mod permission;
mod reload;
mod run;
mod status;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("run", sub_matches)) => run::handle_run_command(sub_matches),
        Some(("reload", _)) => reload::handle_reload_command(),
        Some(("customize", _)) => customize::handle_customize_command(),
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches),
        Some(("check-update", sub_matches)) => {
            check_update::handle_check_update_command(sub_matches)
        }
        Some(("permission", sub_matches)) => permission::handle_permission_command(sub_matches),
        Some(("config", sub_matches)) => config::handle_config_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
