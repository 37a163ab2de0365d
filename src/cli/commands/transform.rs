//! Transform command implementation
//!
//! Reads decoder dumps, transforms every message and writes one pretty-printed
//! GeoJSON file per feature.

use super::shared::{create_progress_bar, expand_inputs, load_configuration, setup_logging};
use crate::app::adapters::decoder_dump::read_decoded_messages;
use crate::app::models::Feature;
use crate::app::services::table_resolver::CodeFlagTables;
use crate::app::services::transform::{MessageTransformer, TransformStats};
use crate::cli::args::TransformArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Outcome of a transform run
#[derive(Debug, Clone, Default)]
pub struct TransformReport {
    /// Input files found after glob expansion
    pub files: usize,
    /// Files that could not be read as a decoder dump
    pub failed_files: usize,
    /// GeoJSON files written
    pub written: usize,
    /// Features skipped because an earlier feature of this run had the same id
    pub duplicates: usize,
    /// Message, subset and element counts
    pub stats: TransformStats,
    pub elapsed: Duration,
}

/// Run the transform command
pub fn run_transform(args: TransformArgs) -> Result<TransformReport> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    info!("Starting bufr2geojson transform");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        return Err(Error::configuration("No input files matched"));
    }

    fs::create_dir_all(&args.output_dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory {}", args.output_dir.display()),
            e,
        )
    })?;

    let tables = match &config.tables_path {
        Some(root) => CodeFlagTables::new(root.clone()),
        None => {
            info!("No tables path configured, code and flag values will not resolve");
            CodeFlagTables::in_memory()
        }
    };

    let mut report = transform_files(
        &config,
        &tables,
        &files,
        &args.output_dir,
        args.show_progress(),
    )?;
    report.elapsed = start_time.elapsed();

    if !args.quiet {
        print_summary(&report, &args.output_dir);
    }
    Ok(report)
}

/// Transform each dump in turn and write its features
pub fn transform_files(
    config: &Config,
    tables: &CodeFlagTables,
    files: &[PathBuf],
    output_dir: &Path,
    show_progress: bool,
) -> Result<TransformReport> {
    let transformer = MessageTransformer::new(config, tables);
    let mut report = TransformReport {
        files: files.len(),
        ..Default::default()
    };

    let pb = show_progress.then(|| create_progress_bar(files.len() as u64, "Transforming"));
    let mut written_ids: HashSet<String> = HashSet::new();

    for path in files {
        if let Some(pb) = &pb {
            pb.set_message(display_name(path));
        }

        let messages = match read_decoded_messages(path) {
            Ok(messages) => messages,
            Err(e) if !config.fail_on_error => {
                error!("Skipping {}: {}", path.display(), e);
                report.failed_files += 1;
                report.stats.add_error(format!("{}: {}", path.display(), e));
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        let (results, stats) = transformer.transform_messages(messages)?;
        for subset in &results {
            for feature in &subset.features {
                if !written_ids.insert(feature.id.clone()) {
                    warn!(
                        "Duplicate feature id {} from {}, keeping the first",
                        feature.id,
                        path.display()
                    );
                    report.duplicates += 1;
                    continue;
                }
                write_feature(feature, output_dir)?;
                report.written += 1;
            }
        }
        report.stats.merge(&stats);

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
    info!("{}", report.stats.summary());
    Ok(report)
}

/// Write one feature to `{output_dir}/{id}.json`
pub fn write_feature(feature: &Feature, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.json", feature.id));
    let content = serde_json::to_string_pretty(feature)
        .map_err(|e| Error::json(format!("Failed to serialize feature {}", feature.id), e))?;
    fs::write(&path, content)
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
    Ok(path)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_summary(report: &TransformReport, output_dir: &Path) {
    let stats = &report.stats;

    println!("\n{}", "Transform Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(report.elapsed).to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        report.files.to_string().bright_white()
    );
    if report.failed_files > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            report.failed_files.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {} ({} subsets)",
        "Messages:".bright_cyan(),
        stats.messages.to_string().bright_white(),
        stats.subsets
    );
    if stats.failed_messages > 0 || stats.failed_subsets > 0 {
        println!(
            "  {} {} messages, {} subsets",
            "Failed:".bright_red(),
            stats.failed_messages.to_string().bright_red().bold(),
            stats.failed_subsets.to_string().bright_red().bold()
        );
    }
    if report.duplicates > 0 {
        println!(
            "  {} {}",
            "Duplicate ids skipped:".bright_red(),
            report.duplicates.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Missing values dropped:".bright_cyan(),
        stats.elements.dropped_missing.to_string().bright_white()
    );
    println!(
        "  {} {} in {}",
        "Features written:".bright_cyan(),
        report.written.to_string().bright_white().bold(),
        output_dir.display()
    );
}
