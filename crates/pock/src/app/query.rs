use clap::{Arg, ArgAction, Command};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output as JSON")
        .action(ArgAction::SetTrue)
}

pub fn status_command() -> Command {
    Command::new("status")
        .about("Show what the running instance is presenting")
        .arg(json_arg())
}

pub fn check_update_command() -> Command {
    Command::new("check-update")
        .about("Check the release feed for a newer version once")
        .arg(json_arg())
}

pub fn permission_command() -> Command {
    Command::new("permission")
        .about("Show whether the accessibility permission is granted")
        .arg(
            Arg::new("prompt")
                .long("prompt")
                .help("Let the OS prompt for the permission if it is missing")
                .action(ArgAction::SetTrue),
        )
        .arg(json_arg())
}

pub fn config_command() -> Command {
    Command::new("config")
        .about("Print the effective configuration")
        .arg(json_arg())
}
