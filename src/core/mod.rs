// heic2jpg/src/core/mod.rs
pub mod processor;

use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_QUALITY: u8 = 95;

/// Every switch the user can pass, captured once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: Option<PathBuf>,
    pub suffix: String,
    pub quality: u8,
    pub force: bool,
    pub recursive: bool,
    pub delete_original: bool,
    pub jobs: usize,
    pub dry_run: bool,
    pub verbosity: u8,
    pub quiet: bool,
    pub progress: bool,
    pub color: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            suffix: String::new(),
            quality: DEFAULT_QUALITY,
            force: false,
            recursive: false,
            delete_original: false,
            jobs: 1,
            dry_run: false,
            verbosity: 0,
            quiet: false,
            progress: false,
            color: true,
            log_file: None,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ConvertError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConvertError::InvalidParameter(format!(
                    "Output path exists but is not a directory: {}",
                    dir.display()
                )));
            }
        }

        if self.suffix.contains(['/', '\\']) {
            return Err(ConvertError::InvalidParameter(format!(
                "Suffix must not contain path separators: {}",
                self.suffix
            )));
        }

        Ok(())
    }

    /// Level for the log file, and for the terminal unless `quiet` is set.
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn terminal_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            self.level_filter()
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.jobs > 1
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("output exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Failed to delete {}: {source}", path.display())]
    DeleteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected worker failure: {0}")]
    UnexpectedWorkerFailure(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<image::ImageError> for ConvertError {
    fn from(err: image::ImageError) -> Self {
        ConvertError::Codec(err.to_string())
    }
}

impl From<libheif_rs::HeifError> for ConvertError {
    fn from(err: libheif_rs::HeifError) -> Self {
        ConvertError::Codec(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Converted,
    Simulated,
    Skipped,
    Failed,
}

/// Result of processing a single candidate file.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub kind: OutcomeKind,
    pub message: Option<String>,
    /// Source removed after conversion (or, in a dry run, would have been).
    pub original_deleted: bool,
}

impl ConversionOutcome {
    pub fn converted(input: &Path, output: PathBuf) -> Self {
        Self {
            input: input.to_path_buf(),
            output: Some(output),
            kind: OutcomeKind::Converted,
            message: None,
            original_deleted: false,
        }
    }

    pub fn simulated(input: &Path, output: PathBuf) -> Self {
        Self {
            input: input.to_path_buf(),
            output: Some(output),
            kind: OutcomeKind::Simulated,
            message: None,
            original_deleted: false,
        }
    }

    pub fn skipped(input: &Path, output: PathBuf) -> Self {
        Self {
            input: input.to_path_buf(),
            output: Some(output),
            kind: OutcomeKind::Skipped,
            message: Some("output exists".to_string()),
            original_deleted: false,
        }
    }

    pub fn failed(input: &Path, output: Option<PathBuf>, err: &ConvertError) -> Self {
        Self {
            input: input.to_path_buf(),
            output,
            kind: OutcomeKind::Failed,
            message: Some(err.to_string()),
            original_deleted: false,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Converted | OutcomeKind::Simulated)
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub originals_deleted: usize,
    pub failures: Vec<(PathBuf, String)>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &ConversionOutcome) {
        if outcome.original_deleted {
            self.originals_deleted += 1;
        }
        if outcome.success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failures.push((
                outcome.input.clone(),
                outcome.message.clone().unwrap_or_default(),
            ));
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.total() > 0 && self.failed == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
