// heic2jpg/src/processors/compressor.rs
use crate::core::{ConvertError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// JPEG encoder that never leaves a partially written output behind.
pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encodes into a temporary file next to `path` and renames it into
    /// place once the encoder has finished.
    ///
    /// Without `overwrite` the rename refuses to replace an existing file and
    /// fails with [`ConvertError::OutputExists`], so two writers racing for
    /// the same target cannot both win.
    pub fn save_jpeg(&self, image: &DynamicImage, path: &Path, overwrite: bool) -> Result<u64> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = staging_file(dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);
            image.write_with_encoder(encoder)?;
            writer.flush()?;
        }

        let size = staged.as_file().metadata()?.len();
        let persisted = if overwrite {
            staged.persist(path)
        } else {
            staged.persist_noclobber(path)
        };

        persisted.map_err(|e| match e.error.kind() {
            ErrorKind::AlreadyExists => ConvertError::OutputExists(path.to_path_buf()),
            _ => ConvertError::Io(e.error),
        })?;

        Ok(size)
    }
}

// Staged files get the same mode a plain `File::create` would (0666 minus
// umask) instead of tempfile's private 0600.
fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".heic2jpg-").suffix(".tmp");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    Ok(builder.tempfile_in(dir)?)
}
