// heic2jpg/src/processors/batch.rs
use crate::core::processor::FileProcessor;
use crate::core::{
    BatchSummary, ConversionOutcome, ConvertError, OutcomeKind, Result, RunOptions,
};
use crate::processors::Converter;
use crate::utils::reporter::Reporter;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

pub struct BatchRunner<'a> {
    options: &'a RunOptions,
    converter: &'a dyn Converter,
    reporter: &'a Reporter,
    thread_pool: Option<rayon::ThreadPool>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        options: &'a RunOptions,
        converter: &'a dyn Converter,
        reporter: &'a Reporter,
    ) -> Result<Self> {
        // Build the pool once; sequential runs never need one.
        let thread_pool = if options.is_parallel() {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(options.jobs)
                .thread_name(|i| format!("heic2jpg-worker-{}", i))
                .build()
                .map_err(|e| {
                    ConvertError::InvalidParameter(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            options,
            converter,
            reporter,
            thread_pool,
        })
    }

    pub fn run(&self, files: &[PathBuf]) -> BatchSummary {
        let started = Instant::now();
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            log::warn!(logger: self.reporter, "No HEIC/HEIF files found");
            return summary;
        }

        let pb = self.reporter.start_progress(files.len());

        let mut handle = |outcome: ConversionOutcome| {
            self.report(&outcome);
            summary.record(&outcome);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        };

        match &self.thread_pool {
            Some(pool) => {
                log::debug!(
                    logger: self.reporter,
                    "Processing {} files with {} workers",
                    files.len(),
                    pool.current_num_threads()
                );
                let (tx, rx) = mpsc::channel();
                pool.in_place_scope(|scope| {
                    for file in files {
                        let tx = tx.clone();
                        scope.spawn(move |_| {
                            // The receiver outlives the scope, so send cannot fail.
                            let _ = tx.send(self.process_isolated(file));
                        });
                    }
                    drop(tx);

                    for outcome in rx {
                        handle(outcome);
                    }
                });
            }
            None => {
                for file in files {
                    handle(self.process_isolated(file));
                }
            }
        }

        self.reporter.finish_progress();
        summary.elapsed = started.elapsed();
        summary
    }

    /// Runs one file, turning a panic into a failed outcome for that file only.
    fn process_isolated(&self, file: &Path) -> ConversionOutcome {
        let processor = FileProcessor::new(self.options, self.converter, self.reporter);
        panic::catch_unwind(AssertUnwindSafe(|| processor.process(file))).unwrap_or_else(
            |payload| {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "worker panicked".to_string());
                let err = ConvertError::UnexpectedWorkerFailure(detail);
                ConversionOutcome::failed(file, None, &err)
            },
        )
    }

    fn report(&self, outcome: &ConversionOutcome) {
        let input = outcome.input.display();
        let output = outcome
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let message = outcome.message.as_deref().unwrap_or("unknown error");

        match outcome.kind {
            OutcomeKind::Converted => {
                log::info!(logger: self.reporter, "Converted: {} -> {}", input, output)
            }
            OutcomeKind::Simulated => {}
            OutcomeKind::Skipped => log::warn!(
                logger: self.reporter,
                "Skipped {}: {} ({}); use --force to overwrite",
                input,
                message,
                output
            ),
            OutcomeKind::Failed => {
                log::error!(logger: self.reporter, "Failed {}: {}", input, message)
            }
        }
    }
}
