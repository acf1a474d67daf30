// heic2jpg/src/utils/reporter.rs
//! User-facing log stream.
//!
//! A `Reporter` is built once from [`RunOptions`] and handed to every component
//! by reference. It owns up to two `env_logger` loggers, one for the terminal
//! and one for the optional log file, and is passed to the `log` macros with
//! `logger:` instead of being installed as the global logger.

use crate::core::{Result, RunOptions};
use env_logger::{Logger, Target, WriteStyle};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::fs::OpenOptions;
use std::sync::Mutex;

pub struct Reporter {
    console: Option<Logger>,
    file: Option<Logger>,
    show_progress: bool,
    progress: Mutex<Option<ProgressBar>>,
}

impl Reporter {
    pub fn new(options: &RunOptions) -> Result<Self> {
        let write_style = if options.color {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };

        let console = env_logger::Builder::new()
            .filter_level(options.terminal_level_filter())
            .write_style(write_style)
            .format_timestamp(None)
            .format_target(false)
            .target(Target::Stderr)
            .build();

        // The log file ignores --quiet so warnings are never lost from it.
        let file = match &options.log_file {
            Some(path) => {
                let sink = OpenOptions::new().create(true).append(true).open(path)?;
                Some(
                    env_logger::Builder::new()
                        .filter_level(options.level_filter())
                        .write_style(WriteStyle::Never)
                        .format_timestamp_secs()
                        .format_target(false)
                        .target(Target::Pipe(Box::new(sink)))
                        .build(),
                )
            }
            None => None,
        };

        // The macros consult the facade's max level before reaching any
        // logger, so it has to admit everything our sinks may want.
        raise_max_level(options.level_filter());

        Ok(Self {
            console: Some(console),
            file,
            show_progress: options.progress,
            progress: Mutex::new(None),
        })
    }

    /// A reporter that drops every message. Used by library callers and tests.
    pub fn silent() -> Self {
        Self {
            console: None,
            file: None,
            show_progress: false,
            progress: Mutex::new(None),
        }
    }

    /// Creates the progress bar when `--progress` was requested.
    pub fn start_progress(&self, total: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }

        if let Ok(mut slot) = self.progress.lock() {
            *slot = Some(pb.clone());
        }
        Some(pb)
    }

    /// Clears the bar from the terminal. Its final position stays readable
    /// through [`Reporter::progress_position`].
    pub fn finish_progress(&self) {
        if let Some(pb) = self.current_progress() {
            pb.finish_and_clear();
        }
    }

    /// Ticks recorded by the most recent progress bar, if one was shown.
    pub fn progress_position(&self) -> Option<u64> {
        self.current_progress().map(|pb| pb.position())
    }

    fn current_progress(&self) -> Option<ProgressBar> {
        self.progress.lock().ok().and_then(|slot| slot.clone())
    }

    fn active_progress(&self) -> Option<ProgressBar> {
        self.current_progress().filter(|pb| !pb.is_finished())
    }
}

impl Log for Reporter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.console.iter().chain(&self.file).any(|l| l.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if let Some(console) = &self.console {
            match self.active_progress() {
                Some(pb) => pb.suspend(|| console.log(record)),
                None => console.log(record),
            }
        }

        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        if let Some(console) = &self.console {
            console.flush();
        }
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}

fn raise_max_level(level: LevelFilter) {
    if level > log::max_level() {
        log::set_max_level(level);
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("console", &self.console.is_some())
            .field("file", &self.file.is_some())
            .field("show_progress", &self.show_progress)
            .finish()
    }
}
