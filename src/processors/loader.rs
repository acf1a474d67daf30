// heic2jpg/src/processors/loader.rs
use crate::core::{ConvertError, Result};
use image::{DynamicImage, RgbImage};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::path::Path;

/// Decodes the primary image of a HEIC/HEIF container through libheif.
#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        self.validate_path(path)?;

        let lib_heif = LibHeif::new();
        // Read the bytes ourselves: libheif only takes UTF-8 file names.
        let bytes = std::fs::read(path)?;
        let ctx = HeifContext::read_from_bytes(&bytes)?;
        let handle = ctx.primary_image_handle()?;

        let (width, height) = (handle.width(), handle.height());
        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(ConvertError::Codec(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        // JPEG has no alpha channel, so ask libheif for plain interleaved RGB.
        let decoded = lib_heif.decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)?;
        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ConvertError::Codec("No interleaved RGB plane found".to_string()))?;

        let row_len = plane.width as usize * 3;
        let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
        for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
            let row = row.get(..row_len).ok_or_else(|| {
                ConvertError::Codec(format!("Truncated pixel row in {}", path.display()))
            })?;
            pixels.extend_from_slice(row);
        }

        let image = RgbImage::from_raw(plane.width, plane.height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| ConvertError::Codec("Failed to build RGB image".to_string()))?;

        Ok(image)
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ConvertError::PathNotFound(path.to_path_buf()));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ConvertError::Codec(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
