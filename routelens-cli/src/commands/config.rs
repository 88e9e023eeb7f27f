//! Config command - show the effective configuration.

use std::path::PathBuf;

use routelens::config::BACKEND_URL_ENV;
use routelens::PlannerConfig;

use crate::error::CliError;

/// Run the config command.
///
/// Prints the configuration after applying the optional INI file and
/// environment overrides, so users can see exactly what a `find` with
/// the same flags would use.
pub fn run(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = PlannerConfig::load(config_path.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;

    println!("backend url:      {}", config.backend_url);
    println!("request timeout:  {}s", config.request_timeout_secs);
    println!(
        "default center:   {:.4}, {:.4} (zoom {})",
        config.default_center.lat, config.default_center.lon, config.default_zoom
    );
    println!();
    println!("Override the backend URL with {}.", BACKEND_URL_ENV);
    Ok(())
}
