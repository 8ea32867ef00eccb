use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("pock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Widgets on the touch strip")
        .long_about("Pock presents a configurable set of widgets on the secondary display strip. `pock run` keeps the strip session alive, rebuilds it on request, and checks for newer releases in the background.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
