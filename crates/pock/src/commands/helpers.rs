use tracing::warn;

use pock_config::PockConfig;
use pock_core::process::{ControlRequest, check_running, send_control_request};
use pock_core::{CoordinatorError, PockError};
use pock_paths::PockPaths;

pub fn resolve_paths() -> PockPaths {
    PockPaths::resolve().unwrap_or_else(|e| {
        warn!(
            event = "cli.paths.home_dir_fallback",
            error = %e,
            fallback = "/tmp/.pock",
        );
        PockPaths::resolve_or_tmp()
    })
}

/// Load and validate configuration, falling back to defaults on error.
///
/// The failure is reported on stderr and as `cli.config.load_failed`.
pub fn load_config_with_warning(paths: &PockPaths) -> PockConfig {
    let loaded = PockConfig::load(paths).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check {} for errors.",
                e,
                paths.user_config().display()
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                code = e.error_code(),
            );
            PockConfig::default()
        }
    }
}

/// Deliver `request` to the instance named by the pid file. Returns its pid.
pub fn signal_running_instance(
    paths: &PockPaths,
    request: ControlRequest,
) -> Result<u32, CoordinatorError> {
    let pid = check_running(&paths.pid_file()).ok_or(CoordinatorError::NotRunning)?;
    send_control_request(pid, request)?;
    Ok(pid)
}

/// Print a command failure and turn it into the dispatcher's error type.
pub fn report_failure<E>(event: &'static str, e: E) -> Box<dyn std::error::Error>
where
    E: PockError,
{
    eprintln!("Error: {}", e);
    if e.is_user_error() {
        warn!(event = event, code = e.error_code(), error = %e);
    } else {
        tracing::error!(event = event, code = e.error_code(), error = %e);
    }
    Box::new(e)
}
