//! Directory scanning for stamp images.
//!
//! The stamp library is a directory of `{index}.png` files over a fixed,
//! contiguous index range. Reserved indices (tool slots that must not be
//! placed on buttons) are skipped entirely; missing files are collected as
//! warnings, never errors, so a partial library still builds a profile.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Result of scanning the stamp library.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Discovered stamps, in ascending index order.
    pub stamps: Vec<StampAsset>,
    /// Indices whose file was absent (excluding reserved indices).
    pub missing: Vec<u32>,
}

impl ScanResult {
    /// Returns true if any stamps were discovered.
    pub fn has_stamps(&self) -> bool {
        !self.stamps.is_empty()
    }

    /// Returns the number of discovered stamps.
    pub fn stamp_count(&self) -> usize {
        self.stamps.len()
    }
}

/// A single discovered stamp image.
#[derive(Debug, Clone, Serialize)]
pub struct StampAsset {
    /// Library index (1-based).
    pub index: u32,
    /// Path to the image file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Errors that can occur during stamp discovery.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stamp directory does not exist.
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to get file metadata.
    #[error("failed to get file metadata for {0}: {1}")]
    MetadataError(PathBuf, #[source] io::Error),
}

/// Scans a directory for stamps named `{index}.png` over `1..=stamp_count`.
///
/// Indices listed in `reserved` are skipped without comment: they exist in
/// the library but are never placed on buttons. Any other missing index is
/// logged as a warning and recorded in the result's `missing` list.
///
/// # Example
///
/// ```ignore
/// let result = scan_stamps(Path::new("public/stamps"), 14, &[14])?;
/// for stamp in result.stamps {
///     println!("Stamp {}: {}", stamp.index, stamp.path.display());
/// }
/// ```
#[instrument(skip_all, fields(dir = %dir.display(), stamp_count = %stamp_count))]
pub fn scan_stamps(
    dir: &Path,
    stamp_count: u32,
    reserved: &[u32],
) -> Result<ScanResult, ScanError> {
    info!("Scanning stamp library");

    if !dir.exists() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut stamps = Vec::new();
    let mut missing = Vec::new();

    for index in 1..=stamp_count {
        if reserved.contains(&index) {
            debug!(index, "Skipping reserved stamp index");
            continue;
        }

        let path = dir.join(format!("{index}.png"));
        if path.is_file() {
            let metadata = std::fs::metadata(&path)
                .map_err(|e| ScanError::MetadataError(path.clone(), e))?;

            debug!(
                index,
                path = %path.display(),
                size = %metadata.len(),
                "Found stamp image"
            );

            stamps.push(StampAsset {
                index,
                path,
                size_bytes: metadata.len(),
            });
        } else {
            warn!(index, path = %path.display(), "Missing stamp image");
            missing.push(index);
        }
    }

    info!(
        found = %stamps.len(),
        missing = %missing.len(),
        "Stamp scan complete"
    );

    Ok(ScanResult { stamps, missing })
}
