//! Structured logging setup.
//!
//! All crates log through `tracing` with an `event = "<area>.<action>_<state>"`
//! field. This module installs the process-wide subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter when `quiet` is set: only warnings and errors.
const QUIET_FILTER: &str = "warn";

/// Default filter in verbose mode.
const VERBOSE_FILTER: &str = "info";

fn build_filter(quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet { QUIET_FILTER } else { VERBOSE_FILTER })
    })
}

/// Initialize JSON logging to stderr.
///
/// `RUST_LOG` overrides the level chosen by `quiet`.
pub fn init_logging(quiet: bool) {
    init_logging_with_format(quiet, true);
}

/// Initialize logging to stderr, as JSON lines or human-readable text.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging_with_format(quiet: bool, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(quiet))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!(event = "core.logging.init_skipped", reason = "already initialized");
    }
}
