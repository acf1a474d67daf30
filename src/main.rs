use anyhow::Context;
use clap::Parser;
use heic2jpg::{
    discover_files, BatchRunner, BatchSummary, Cli, HeifConverter, Reporter, RunOptions,
};
use log::Log;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<BatchSummary> {
    let (paths, options) = cli.into_options();
    options.validate()?;

    let reporter = Reporter::new(&options).with_context(|| match &options.log_file {
        Some(path) => format!("Failed to open log file {}", path.display()),
        None => "Failed to set up logging".to_string(),
    })?;

    let files = discover_files(&paths, options.recursive, &reporter);
    if !files.is_empty() {
        log::info!(logger: &reporter, "Found {} HEIC file(s) to convert", files.len());
        for file in &files {
            log::debug!(logger: &reporter, "  - {}", file.display());
        }
    }

    let converter = HeifConverter::new();
    let runner = BatchRunner::new(&options, &converter, &reporter)
        .context("Failed to start worker pool")?;
    let summary = runner.run(&files);

    print_summary(&summary, &options, &reporter);
    reporter.flush();

    Ok(summary)
}

fn print_summary(summary: &BatchSummary, options: &RunOptions, reporter: &Reporter) {
    let prefix = if options.dry_run { "[dry-run] " } else { "" };
    log::info!(
        logger: reporter,
        "{}Conversion complete: {} succeeded, {} failed (of {}) in {:.2?}",
        prefix,
        summary.succeeded,
        summary.failed,
        summary.total(),
        summary.elapsed
    );

    for (path, reason) in &summary.failures {
        log::debug!(logger: reporter, "  failed: {} ({})", path.display(), reason);
    }

    if options.delete_original {
        let verb = if options.dry_run { "would be" } else { "were" };
        log::info!(
            logger: reporter,
            "{}{} original HEIC file(s) {} deleted",
            prefix,
            summary.originals_deleted,
            verb
        );
    }
}
