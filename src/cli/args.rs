//! Command-line argument definitions for bufr2geojson
//!
//! Defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the BUFR to GeoJSON transformer
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bufr2geojson",
    version,
    about = "Convert decoded WMO BUFR messages into GeoJSON observation features",
    long_about = "Reads JSON dumps of decoded BUFR messages, tracks the qualifiers in force \
                  while scanning each subset, and writes one GeoJSON feature per observed \
                  value with its location, time, vertical coordinate and station identity."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Transform decoder dumps into one GeoJSON file per observation
    Transform(TransformArgs),
}

/// Arguments for the transform command
#[derive(Debug, Clone, Parser)]
pub struct TransformArgs {
    /// Decoder dump files or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Directory the GeoJSON features are written to
    ///
    /// Created if it does not exist. Each feature is written to
    /// `<feature id>.json`.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Root of the code and flag tables
    ///
    /// Expected layout is `<DIR>/<version>/BUFRCREX_CodeFlag_en.txt`.
    /// Overrides `tables_path` from the config file and environment.
    #[arg(long = "tables", value_name = "DIR")]
    pub tables: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// Defaults to `<config dir>/bufr2geojson/config.toml` when present.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Treat invalid dates and missing coordinates as errors
    #[arg(long = "strict")]
    pub strict: bool,

    /// Synthesize WIGOS identifiers for traditional station identifiers
    #[arg(long = "guess-wsi")]
    pub guess_wsi: bool,

    /// Abort on the first failing subset or message
    #[arg(long = "fail-on-error")]
    pub fail_on_error: bool,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl TransformArgs {
    /// Validate argument combinations that clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.is_file() {
            return Err(Error::configuration(format!(
                "Output path '{}' is a file, expected a directory",
                self.output_dir.display()
            )));
        }
        if let Some(tables) = &self.tables {
            if !tables.is_dir() {
                return Err(Error::configuration(format!(
                    "Tables directory does not exist: {}",
                    tables.display()
                )));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
