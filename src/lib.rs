mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use crate::core::processor::FileProcessor;
pub use crate::core::{
    BatchSummary, ConversionOutcome, ConvertError, OutcomeKind, Result, RunOptions,
    DEFAULT_QUALITY,
};
pub use processors::{
    discover_files, BatchRunner, Compressor, Converter, HeifConverter, Loader,
};
pub use utils::reporter::Reporter;
pub use utils::{
    format_file_size, is_supported_format, output_path_for, resolve_output_path,
    SUPPORTED_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        discover_files, BatchRunner, Converter, HeifConverter, Reporter, RunOptions,
    };
}
