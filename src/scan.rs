//! Input collection: walk the source directory into an ordered batch.
//!
//! The filesystem is the data source. Files with a supported image extension
//! are collected recursively and sorted by path, so the input ordering (and
//! therefore the output numbering) is deterministic for a given directory —
//! independent of filesystem enumeration order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions whose decoders are compiled in and known to work.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source directory not found: {0}")]
    SourceNotFound(PathBuf),
}

/// One input photograph: its name (for diagnostics and the summary) and its
/// original bytes, which are both processed and sent to the captioning
/// service untouched.
#[derive(Debug, Clone)]
pub struct InputImage {
    /// Path relative to the source root, so same-named files in different
    /// subdirectories stay distinguishable in skip lists and summaries.
    pub source_name: String,
    pub bytes: Vec<u8>,
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Collect every supported image under `source`, sorted by path.
pub fn collect_inputs(source: &Path) -> Result<Vec<InputImage>, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::SourceNotFound(source.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(source) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_supported_extension(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
            // An unreadable entry must not abort the batch, but it should
            // not vanish silently either
            Err(err) => println!("  skipping unreadable entry: {err}"),
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let bytes = std::fs::read(&path)?;
            let source_name = path
                .strip_prefix(source)
                .unwrap_or(path.as_path())
                .display()
                .to_string();
            Ok(InputImage { source_name, bytes })
        })
        .collect()
}
