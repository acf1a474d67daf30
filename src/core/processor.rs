// heic2jpg/src/core/processor.rs
use super::{ConversionOutcome, ConvertError, RunOptions};
use crate::processors::Converter;
use crate::utils::reporter::Reporter;
use crate::utils::{format_file_size, output_path_for, resolve_output_path};
use std::path::Path;

/// Handles a single candidate file: skip, simulate, or convert, then
/// optionally remove the source.
pub struct FileProcessor<'a> {
    options: &'a RunOptions,
    converter: &'a dyn Converter,
    reporter: &'a Reporter,
}

impl<'a> FileProcessor<'a> {
    pub fn new(
        options: &'a RunOptions,
        converter: &'a dyn Converter,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            options,
            converter,
            reporter,
        }
    }

    pub fn process(&self, input: &Path) -> ConversionOutcome {
        let output_dir = self.options.output_dir.as_deref();
        let suffix = self.options.suffix.as_str();

        let output = if self.options.dry_run {
            output_path_for(input, output_dir, suffix)
        } else {
            match resolve_output_path(input, output_dir, suffix) {
                Ok(path) => path,
                Err(e) => return ConversionOutcome::failed(input, None, &e),
            }
        };

        // Cheap early exit; the converter re-checks atomically when it
        // writes, which is what settles races between workers.
        if output.exists() && !self.options.force {
            log::debug!(logger: self.reporter, "{}", ConvertError::OutputExists(output.clone()));
            return ConversionOutcome::skipped(input, output);
        }

        if self.options.dry_run {
            log::info!(
                logger: self.reporter,
                "[dry-run] Would convert: {} -> {}",
                input.display(),
                output.display()
            );
            let mut outcome = ConversionOutcome::simulated(input, output);
            if self.options.delete_original {
                log::info!(
                    logger: self.reporter,
                    "[dry-run] Would delete original: {}",
                    input.display()
                );
                outcome.original_deleted = true;
            }
            return outcome;
        }

        match self
            .converter
            .convert(input, &output, self.options.quality, self.options.force)
        {
            Ok(()) => {}
            Err(ConvertError::OutputExists(_)) => {
                return ConversionOutcome::skipped(input, output);
            }
            Err(e) => return ConversionOutcome::failed(input, Some(output), &e),
        }

        if let Ok(metadata) = std::fs::metadata(&output) {
            log::debug!(
                logger: self.reporter,
                "Wrote {} ({})",
                output.display(),
                format_file_size(metadata.len())
            );
        }

        let mut outcome = ConversionOutcome::converted(input, output);
        if self.options.delete_original {
            outcome.original_deleted = self.delete_original(input);
        }
        outcome
    }

    // A failed delete is reported but leaves the outcome successful.
    fn delete_original(&self, input: &Path) -> bool {
        match std::fs::remove_file(input) {
            Ok(()) => {
                log::info!(logger: self.reporter, "Deleted original: {}", input.display());
                true
            }
            Err(source) => {
                let err = ConvertError::DeleteFailure {
                    path: input.to_path_buf(),
                    source,
                };
                log::error!(logger: self.reporter, "{}", err);
                false
            }
        }
    }
}
