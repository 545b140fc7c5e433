use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::aggregators::RegionAggregator;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::readers::{ObservationReader, ScanReport};
use crate::reports::{ReportFormat, SummaryReport};
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Summarize {
            files,
            format,
            fail_fast,
            mmap,
        } => {
            let format = ReportFormat::parse(&format)?;
            run_summarize(&files, format, fail_fast, mmap)
        }

        Commands::Validate { files, max_errors } => run_validate(&files, max_errors),
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tdv_processor={}", level)));

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
}

fn run_summarize(
    files: &[PathBuf],
    format: ReportFormat,
    fail_fast: bool,
    mmap: bool,
) -> Result<()> {
    // Keep stdout clean for machine-readable output
    let silent = format == ReportFormat::Json;
    let progress = ProgressReporter::spinner("Aggregating observations...", silent);

    let reader = ObservationReader::with_mmap(mmap);
    let mut aggregator = RegionAggregator::new();
    let mut files_read = 0usize;

    for path in files {
        progress.println(&format!("Opening file: {}", path.display()));
        progress.set_message(&format!("Aggregating {}", path.display()));

        match ingest_file(&reader, &mut aggregator, path, mmap) {
            Ok(count) => {
                files_read += 1;
                debug!("{}: {} records aggregated", path.display(), count);
            }
            Err(e) if !fail_fast => {
                eprintln!("Error: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    progress.finish_with_message(&format!(
        "Aggregated {} records across {} regions",
        aggregator.total_records(),
        aggregator.len()
    ));

    info!(
        "{} of {} files read, {} regions found",
        files_read,
        files.len(),
        aggregator.len()
    );

    let report = SummaryReport::from_aggregator(&aggregator);
    match format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}

/// Folds one file into the aggregator, returning how many records it added.
/// An error abandons the rest of that file; records already folded stay in.
fn ingest_file(
    reader: &ObservationReader,
    aggregator: &mut RegionAggregator,
    path: &Path,
    mmap: bool,
) -> Result<u64> {
    let mut count = 0u64;

    if mmap {
        for observation in reader.read_observations(path)? {
            aggregator.ingest(observation);
            count += 1;
        }
    } else {
        for observation in reader.stream_observations(path)? {
            aggregator.ingest(observation?);
            count += 1;
        }
    }

    Ok(count)
}

fn run_validate(files: &[PathBuf], max_errors: usize) -> Result<()> {
    println!("Validating {} file(s)...", files.len());

    let reader = ObservationReader::new();
    let progress = ProgressReporter::bar(files.len() as u64, "Scanning observation files", false);

    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for path in files {
        match reader.scan(path, max_errors) {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(e),
        }
        progress.increment(1);
    }

    progress.finish_with_message("Scan complete");

    for report in &reports {
        println!(
            "\n{}: {} lines, {} valid, {} malformed, {} blank",
            report.path.display(),
            report.total_lines,
            report.valid_records,
            report.malformed_records,
            report.blank_lines
        );
        for issue in &report.issues {
            println!("  line {}: {}", issue.line_number, issue.reason);
        }
    }

    for failure in &failures {
        eprintln!("Error: {}", failure);
    }

    if failures.is_empty() && reports.iter().all(ScanReport::is_clean) {
        println!("\n✅ All records parsed cleanly");
    } else {
        let total_malformed: u64 = reports.iter().map(|r| r.malformed_records).sum();
        println!(
            "\n⚠️  Found {} malformed records, {} unreadable files",
            total_malformed,
            failures.len()
        );
    }

    Ok(())
}
