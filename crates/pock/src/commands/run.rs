use std::sync::Arc;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use pock_config::PockConfig;
use pock_core::process::{self, ControlSignals, pid};
use pock_core::watch::{self, ConfigWatcher};
use pock_core::{
    Coordinator, CoordinatorError, CoordinatorSettings, DesktopShell, LayoutHost, LocalBus,
    NotificationBus, PermissionGate, PreferencesPane, ReleaseFeedChecker,
};
use pock_paths::PockPaths;

use super::helpers::{load_config_with_warning, report_failure, resolve_paths};

pub(crate) fn handle_run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let no_prompt = matches.get_flag("no-prompt");
    info!(event = "cli.run_started", no_prompt = no_prompt);

    let paths = resolve_paths();
    let mut config = load_config_with_warning(&paths);
    if no_prompt {
        config.permission.prompt_on_launch = Some(false);
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| report_failure("cli.run_failed", CoordinatorError::from(e)))?;

    // Handlers go in before the pid file names this process as a target.
    let control = {
        let _guard = runtime.enter();
        ControlSignals::register()
    }
    .map_err(|e| report_failure("cli.run_failed", e))?;

    let pid_path = paths.pid_file();
    pid::acquire_pid_file(&pid_path).map_err(|e| report_failure("cli.run_failed", e))?;

    let result = runtime.block_on(serve(&paths, &config, control));

    if let Err(e) = pid::remove_pid_file(&pid_path) {
        warn!(event = "cli.run.pid_remove_failed", error = %e);
    }

    match result {
        Ok(()) => {
            info!(event = "cli.run_completed");
            Ok(())
        }
        Err(e) => Err(report_failure("cli.run_failed", e)),
    }
}

async fn serve(
    paths: &PockPaths,
    config: &PockConfig,
    control: ControlSignals,
) -> Result<(), CoordinatorError> {
    let settings = CoordinatorSettings::from_config(config);
    let checker = ReleaseFeedChecker::new(
        config.updates.feed_url(),
        env!("CARGO_PKG_VERSION"),
        settings.scheduler.check_timeout,
    )?;

    let preferences = PreferencesPane::new();
    let mut coordinator = Coordinator::new(
        PermissionGate::platform_default(),
        Box::new(LayoutHost::new(paths.widgets_file())),
        Arc::new(checker),
        Box::new(preferences.clone()),
        Box::new(DesktopShell::new(preferences)),
        settings,
    )
    .with_status_file(paths.status_file());

    let bus: Arc<dyn NotificationBus> = Arc::new(LocalBus::new());
    // Subscribe before any publisher starts.
    let signals = bus.subscribe();
    let token = CancellationToken::new();

    tokio::spawn(process::wait_for_shutdown_signal(token.clone()));
    let control_task = tokio::spawn(control.forward(bus.clone(), token.clone()));

    match ConfigWatcher::new(paths.pock_dir()) {
        Ok(watcher) => {
            tokio::spawn(watch::run_watch_loop(
                watcher,
                paths.clone(),
                bus.clone(),
                token.clone(),
            ));
        }
        Err(e) => {
            eprintln!("Warning: {}. Edits to ~/.pock will not be picked up.", e);
            warn!(event = "cli.run.watch_failed", error = %e);
        }
    }

    let report = coordinator.startup();
    if !report.permission_granted {
        eprintln!("Note: accessibility permission not granted; notification badges are disabled.");
    }
    if report.session.is_none() {
        eprintln!(
            "Warning: could not build the widget strip. Fix {} and run `pock reload`.",
            paths.widgets_file().display()
        );
    }

    println!(
        "Pock running (PID: {}). `pock reload` rebuilds the strip, `pock customize` \
         opens the layout, Ctrl+C quits.",
        std::process::id()
    );

    coordinator.run(signals, token.clone()).await;

    coordinator.shutdown();
    token.cancel();

    if let Err(e) = control_task.await {
        warn!(event = "cli.run.control_task_failed", error = %e);
    }

    Ok(())
}
