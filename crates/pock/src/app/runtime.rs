use clap::{Arg, ArgAction, Command};

pub fn run_command() -> Command {
    Command::new("run")
        .about("Run Pock in the foreground")
        .long_about(
            "Checks the accessibility permission, presents the widget strip, and \
             serves reload and update signals until interrupted. SIGHUP or an edit \
             to ~/.pock/widgets.toml rebuilds the strip; SIGUSR1 opens the layout.",
        )
        .arg(
            Arg::new("no-prompt")
                .long("no-prompt")
                .help("Do not ask the OS to prompt for the accessibility permission")
                .action(ArgAction::SetTrue),
        )
}

pub fn reload_command() -> Command {
    Command::new("reload").about("Ask the running instance to rebuild the widget strip")
}

pub fn customize_command() -> Command {
    Command::new("customize").about("Ask the running instance to open the widget layout for editing")
}
