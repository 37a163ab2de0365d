use anyhow::Context;
use bufr2geojson::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args).context("transform failed") {
        Ok(report) => {
            // Partial failures exit with 2
            if report.failed_files > 0 || report.duplicates > 0 || !report.stats.is_clean() {
                process::exit(2);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
