//! Run driver: configuration, scan, render, write, summary.
use crate::cli::{Cli, ReportFormat};
use crate::config::AuditConfig;
use crate::error::Result;
use crate::matcher::{ScanOptions, ScanOutcome, Scanner};
use crate::output::write_atomic;
use crate::progress::ScanProgress;
use crate::report::{render_html, render_json};
use colored::*;
use log::info;
use std::time::Instant;

/// Runs one audit described by the configuration file named on the command line.
pub fn run(cli: &Cli) -> Result<ScanOutcome> {
    let start_time = Instant::now();

    let config = AuditConfig::load(&cli.config)?;
    println!("Using configuration from {}", cli.config.display());
    config.validate()?;

    let scanner = Scanner::with_options(
        &config.search_terms,
        ScanOptions {
            parallel: cli.parallel,
        },
    )?;

    let progress = ScanProgress::start(format!("Scanning {}...", config.directory.display()));
    let scanned = scanner.scan(&config.directory);
    progress.finish();
    let outcome = scanned?;
    report_file_messages(&outcome);
    info!(
        "Visited {} files, scanned contents of {} in {:.2?}",
        outcome.files_visited,
        outcome.files_content_scanned,
        start_time.elapsed()
    );

    let directory = config.directory.display().to_string();
    let document = match cli.format {
        ReportFormat::Html => render_html(
            &outcome.records,
            &directory,
            &config.search_terms,
            &config.base_url,
        ),
        ReportFormat::Json => render_json(
            &outcome.records,
            &directory,
            &config.search_terms,
            &config.base_url,
        )?,
    };
    write_atomic(&config.output_file, &document)?;

    println!(
        "{} {}",
        "Results saved to".green(),
        config.output_file.display()
    );
    println!("- Directory searched: {directory}");
    println!("- Terms searched: {}", config.search_terms.join(", "));
    println!("- Number of results: {}", outcome.records.len());

    Ok(outcome)
}

/// Per-file operator messages, printed to stdout in walk order.
fn report_file_messages(outcome: &ScanOutcome) {
    for record in &outcome.records {
        let file_name = record
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&record.relative_path);
        for term in &record.filename_terms {
            println!("Match found: {file_name} contains {term}");
        }
    }

    if !outcome.read_errors.is_empty() {
        println!("\n{}", "Errors encountered during processing:".red().bold());
        for err in &outcome.read_errors {
            println!("{}", err.to_string().red());
        }
    }
}
