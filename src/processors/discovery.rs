// heic2jpg/src/processors/discovery.rs
use crate::utils::is_supported_format;
use crate::utils::reporter::Reporter;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects every HEIC/HEIF file reachable from `inputs`.
///
/// Missing paths are warned about and skipped. The result is deduplicated (two
/// spellings of the same file count once) and sorted so that repeated runs
/// process files in the same order.
pub fn discover_files<P: AsRef<Path>>(
    inputs: &[P],
    recursive: bool,
    reporter: &Reporter,
) -> Vec<PathBuf> {
    let mut found = Found::default();

    for input in inputs {
        let input = input.as_ref();

        if !input.exists() {
            log::warn!(logger: reporter, "Path not found: {}", input.display());
            continue;
        }

        if input.is_dir() {
            collect_from_dir(input, recursive, reporter, &mut found);
        } else if is_supported_format(input) {
            found.insert(input.to_path_buf());
        } else {
            log::debug!(logger: reporter, "Skipping non-HEIC file: {}", input.display());
        }
    }

    let mut files = found.files;
    files.sort();
    files
}

#[derive(Default)]
struct Found {
    seen: HashSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl Found {
    fn insert(&mut self, path: PathBuf) {
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.seen.insert(key) {
            self.files.push(path);
        }
    }
}

fn collect_from_dir(
    dir: &Path,
    recursive: bool,
    reporter: &Reporter,
    found: &mut Found,
) {
    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(logger: reporter, "Cannot read directory entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_supported_format(entry.path()) {
            found.insert(entry.into_path());
        }
    }
}
