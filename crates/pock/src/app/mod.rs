mod global;
mod query;
mod runtime;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(runtime::run_command())
        .subcommand(runtime::reload_command())
        .subcommand(runtime::customize_command())
        .subcommand(query::status_command())
        .subcommand(query::check_update_command())
        .subcommand(query::permission_command())
        .subcommand(query::config_command())
}
