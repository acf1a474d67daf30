// heic2jpg/src/processors/mod.rs
mod batch;
mod compressor;
mod converter;
mod discovery;
mod loader;

pub use batch::BatchRunner;
pub use compressor::Compressor;
pub use converter::{Converter, HeifConverter};
pub use discovery::discover_files;
pub use loader::Loader;
