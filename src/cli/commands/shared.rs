//! Shared components for CLI commands

use crate::cli::args::TransformArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Set up structured logging for the transform command
pub fn setup_logging(args: &TransformArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bufr2geojson={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &TransformArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
///
/// Flags only ever switch behaviour on; they never turn off a setting made
/// in the file or environment.
pub fn apply_cli_overrides(config: &mut Config, args: &TransformArgs) {
    if let Some(tables) = &args.tables {
        config.tables_path = Some(tables.clone());
    }
    config.strict |= args.strict;
    config.guess_wsi |= args.guess_wsi;
    config.fail_on_error |= args.fail_on_error;
}

/// Expand input arguments into a sorted, de-duplicated file list
///
/// Arguments without glob metacharacters are taken literally so a missing
/// file surfaces as a read error rather than silently matching nothing.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            files.push(PathBuf::from(input));
            continue;
        }

        let matches = glob::glob(input).map_err(|e| {
            Error::configuration(format!("Invalid input pattern '{}': {}", input, e))
        })?;
        let before = files.len();
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
        if files.len() == before {
            warn!("Pattern '{}' matched no files", input);
        }
    }

    files.sort();
    files.dedup();
    debug!("Expanded {} input arguments to {} files", inputs.len(), files.len());
    Ok(files)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
