// heic2jpg/src/processors/converter.rs
use super::{Compressor, Loader};
use crate::core::Result;
use std::path::Path;

/// Turns one input image into one JPEG.
///
/// Implementations must be deterministic for identical inputs and must not
/// leave a partial file at `output` when they fail. When `overwrite` is false
/// and `output` already exists at the moment it would be written, they fail
/// with [`ConvertError::OutputExists`](crate::core::ConvertError::OutputExists)
/// and leave the existing file alone.
pub trait Converter: Send + Sync {
    fn convert(&self, input: &Path, output: &Path, quality: u8, overwrite: bool) -> Result<()>;
}

/// libheif decode followed by a JPEG encode.
#[derive(Default)]
pub struct HeifConverter {
    loader: Loader,
}

impl HeifConverter {
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
        }
    }
}

impl Converter for HeifConverter {
    fn convert(&self, input: &Path, output: &Path, quality: u8, overwrite: bool) -> Result<()> {
        let image = self.loader.load(input)?;
        Compressor::new(quality).save_jpeg(&image, output, overwrite)?;
        Ok(())
    }
}
