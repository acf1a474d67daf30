// heic2jpg/src/cli.rs
use crate::core::{RunOptions, DEFAULT_QUALITY};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heic2jpg", version, about = "Convert HEIC/HEIF images to JPEG")]
pub struct Cli {
    /// Files or directories to convert
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Write JPEGs here instead of next to each input
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Text appended to each output file name, before the extension
    #[arg(short, long, default_value = "")]
    pub suffix: String,

    /// JPEG quality
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Remove each source file after it converts successfully
    #[arg(long)]
    pub delete_original: bool,

    /// Number of parallel workers (1 = sequential)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Show what would happen without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// More output; repeat for trace level
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors to the terminal
    #[arg(long)]
    pub quiet: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn into_options(self) -> (Vec<PathBuf>, RunOptions) {
        let options = RunOptions {
            output_dir: self.output_dir,
            suffix: self.suffix,
            quality: self.quality,
            force: self.force,
            recursive: self.recursive,
            delete_original: self.delete_original,
            jobs: self.jobs,
            dry_run: self.dry_run,
            verbosity: self.verbose,
            quiet: self.quiet,
            progress: self.progress,
            color: !self.no_color,
            log_file: self.log_file,
        };
        (self.paths, options)
    }
}
