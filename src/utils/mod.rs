// heic2jpg/src/utils/mod.rs
pub mod reporter;

use crate::core::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["heic", "heif"];

pub const OUTPUT_EXTENSION: &str = "jpg";

/// Output location for `input_path` without touching the filesystem.
pub fn output_path_for(input_path: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    // Built as an OsString so non-UTF-8 stems survive byte for byte.
    let mut file_name = input_path
        .file_stem()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("image"));
    file_name.push(suffix);
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

/// Like [`output_path_for`], but creates `output_dir` (and its parents) if
/// it does not exist yet.
pub fn resolve_output_path(
    input_path: &Path,
    output_dir: Option<&Path>,
    suffix: &str,
) -> Result<PathBuf> {
    if let Some(dir) = output_dir {
        if !dir.is_dir() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(output_path_for(input_path, output_dir, suffix))
}

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
