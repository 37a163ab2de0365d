//! Command implementations for the bufr2geojson CLI
//!
//! Each command lives in its own module; helpers shared between commands
//! are in `shared`.

pub mod shared;
pub mod transform;

pub use transform::TransformReport;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
pub fn run(args: Args) -> Result<TransformReport> {
    match args.command {
        Commands::Transform(transform_args) => transform::run_transform(transform_args),
    }
}
