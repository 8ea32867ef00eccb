use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use pock_core::{CoordinatorError, ReleaseFeedChecker, UpdateCheckResult, VersionChecker};

use super::helpers::{load_config_with_warning, report_failure, resolve_paths};

#[derive(Debug, Serialize)]
struct CheckUpdateOutput {
    current_version: String,
    feed_url: String,
    update: Option<UpdateCheckResult>,
}

fn render_text(output: &CheckUpdateOutput) -> String {
    match &output.update {
        Some(update) => format!(
            "Pock {} is available (running {}).\nDownload: {}",
            update.version_number, output.current_version, update.download_url
        ),
        None => format!("Pock {} is up to date.", output.current_version),
    }
}

pub(crate) fn handle_check_update_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.check_update_started", json_output = json_output);

    let paths = resolve_paths();
    let config = load_config_with_warning(&paths);
    let timeout = config
        .updates
        .check_timeout_secs()
        .map(std::time::Duration::from_secs);

    let checker = ReleaseFeedChecker::new(
        config.updates.feed_url(),
        env!("CARGO_PKG_VERSION"),
        timeout,
    )
    .map_err(|e| report_failure("cli.check_update_failed", e))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| report_failure("cli.check_update_failed", CoordinatorError::from(e)))?;
    let update = rt
        .block_on(checker.fetch_latest_version())
        .map_err(|e| report_failure("cli.check_update_failed", e))?;

    let output = CheckUpdateOutput {
        current_version: checker.current_version().to_string(),
        feed_url: checker.feed_url().to_string(),
        update,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_text(&output));
    }

    info!(
        event = "cli.check_update_completed",
        update_available = output.update.is_some(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_up_to_date() {
        let output = CheckUpdateOutput {
            current_version: "0.1.0".to_string(),
            feed_url: "https://pock.dev/api/latestRelease.json".to_string(),
            update: None,
        };
        assert_eq!(render_text(&output), "Pock 0.1.0 is up to date.");
    }

    #[test]
    fn test_render_text_update_available() {
        let output = CheckUpdateOutput {
            current_version: "0.1.0".to_string(),
            feed_url: "https://pock.dev/api/latestRelease.json".to_string(),
            update: Some(UpdateCheckResult::new("2.0.0", "https://example/d")),
        };
        assert_eq!(
            render_text(&output),
            "Pock 2.0.0 is available (running 0.1.0).\nDownload: https://example/d"
        );
    }

    #[test]
    fn test_json_shape() {
        let output = CheckUpdateOutput {
            current_version: "0.1.0".to_string(),
            feed_url: "https://pock.dev/api/latestRelease.json".to_string(),
            update: Some(UpdateCheckResult::new("2.0.0", "https://example/d")),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["update"]["version_number"], "2.0.0");
        assert_eq!(json["update"]["download_url"], "https://example/d");
        assert_eq!(json["current_version"], "0.1.0");
    }
}
