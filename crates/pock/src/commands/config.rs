use clap::ArgMatches;
use tracing::info;

use pock_config::PockConfig;

use super::helpers::{report_failure, resolve_paths};

fn render(config: &PockConfig, json_output: bool) -> Result<String, Box<dyn std::error::Error>> {
    let effective = config.effective();
    if json_output {
        Ok(serde_json::to_string_pretty(&effective)?)
    } else {
        Ok(toml::to_string_pretty(&effective)?)
    }
}

pub(crate) fn handle_config_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.config_started", json_output = json_output);

    let paths = resolve_paths();
    let config = PockConfig::load(&paths).map_err(|e| report_failure("cli.config_failed", e))?;
    config
        .validate()
        .map_err(|e| report_failure("cli.config_failed", e))?;

    println!("{}", render(&config, json_output)?.trim_end());

    info!(event = "cli.config_completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_shows_defaults() {
        let rendered = render(&PockConfig::default(), false).unwrap();
        assert!(rendered.contains("[updates]"));
        assert!(rendered.contains("interval_secs = 86400"));
        assert!(rendered.contains("prompt_on_launch = true"));
    }

    #[test]
    fn test_render_json_shows_defaults() {
        let rendered = render(&PockConfig::default(), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["updates"]["enabled"], true);
        assert_eq!(json["updates"]["check_timeout_secs"], 30);
        assert_eq!(json["logging"]["json"], true);
    }
}
