use pock_config::PockConfig;
use pock_core::init_logging_with_format;
use pock_paths::PockPaths;

mod app;
mod commands;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    let verbose = matches.get_flag("verbose");
    let quiet = !verbose;

    // Log format is a config setting; a broken config falls back to JSON and
    // is reported by the command itself.
    let json_logs = PockConfig::load(&PockPaths::resolve_or_tmp())
        .map(|config| config.logging.json())
        .unwrap_or(true);
    init_logging_with_format(quiet, json_logs);

    if let Err(e) = commands::run_command(&matches) {
        // Already reported on stderr by the handler.
        drop(e);
        std::process::exit(1);
    }
}
