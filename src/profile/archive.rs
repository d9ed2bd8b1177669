//! Serialization of a profile tree into the `.ulanziDeckProfile` container.
//!
//! The container is a standard deflate-compressed zip with a 12-byte ASCII
//! sentinel prepended. Ulanzi Studio refuses archives without the sentinel,
//! and zip writers cannot emit leading bytes before the archive's own magic,
//! so the zip is assembled in memory and the destination file is written in
//! a single pass: header first, then the zip bytes.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Result, StampError};

/// Sentinel prefix the consuming device software expects before the zip
/// magic bytes. Exactly 12 bytes.
pub const PROFILE_HEADER: &[u8] = b"#Version: 2\n";

/// Serializes every file under `base` into `output`.
///
/// Entry names are the paths relative to `base`, so `base` is the scratch
/// root holding the `{uuid}.ulanziProfile/` directory. Files are added in
/// sorted order for byte-stable output. Parent directories of `output` are
/// created; the destination is only written once the archive is complete.
pub fn write_profile_archive(base: &Path, output: &Path) -> Result<PathBuf> {
    let mut files = Vec::new();
    collect_files(base, &mut files)?;
    files.sort();

    debug!(count = files.len(), "Serializing profile tree");

    // Fixed entry timestamp keeps repeated builds byte-identical
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for path in &files {
        let relative = path
            .strip_prefix(base)
            .map_err(|e| StampError::Archive(e.to_string()))?;
        // Zip entry names always use forward slashes
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        zip.start_file(name.as_str(), options)
            .map_err(|e| StampError::Archive(format!("failed to add {name}: {e}")))?;
        let contents = std::fs::read(path)?;
        zip.write_all(&contents)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| StampError::Archive(e.to_string()))?;
    let zip_bytes = cursor.into_inner();

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut out = std::fs::File::create(output)?;
    out.write_all(PROFILE_HEADER)?;
    out.write_all(&zip_bytes)?;
    out.flush()?;

    info!(
        output = %output.display(),
        entries = files.len(),
        bytes = PROFILE_HEADER.len() + zip_bytes.len(),
        "Wrote profile archive"
    );

    Ok(output.to_path_buf())
}

/// Recursively collects every file below `dir`.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn build_sample_tree(base: &Path) {
        let profile = base.join("abc.ulanziProfile");
        std::fs::create_dir_all(profile.join("Profiles/p1/Images")).unwrap();
        std::fs::write(profile.join("manifest.json"), b"{}").unwrap();
        std::fs::write(profile.join("Profiles/p1/manifest.json"), b"{}").unwrap();
        std::fs::write(profile.join("Profiles/p1/Images/hash.png"), b"png-bytes").unwrap();
    }

    #[test]
    fn test_header_then_valid_zip() {
        let scratch = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        build_sample_tree(scratch.path());
        let output = out_dir.path().join("test.ulanziDeckProfile");

        write_profile_archive(scratch.path(), &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..12], PROFILE_HEADER);
        // Zip magic directly after the header
        assert_eq!(&bytes[12..14], b"PK");

        let mut archive = ZipArchive::new(Cursor::new(&bytes[12..])).unwrap();
        assert_eq!(archive.len(), 3);

        let mut manifest = String::new();
        archive
            .by_name("abc.ulanziProfile/manifest.json")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert_eq!(manifest, "{}");

        let mut image = Vec::new();
        archive
            .by_name("abc.ulanziProfile/Profiles/p1/Images/hash.png")
            .unwrap()
            .read_to_end(&mut image)
            .unwrap();
        assert_eq!(image, b"png-bytes");
    }

    #[test]
    fn test_creates_parent_directories() {
        let scratch = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        build_sample_tree(scratch.path());
        let output = out_dir.path().join("deep/nested/dir/test.ulanziDeckProfile");

        write_profile_archive(scratch.path(), &output).unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_byte_stable_across_runs() {
        let scratch = TempDir::new().unwrap();
        build_sample_tree(scratch.path());
        let out_dir = TempDir::new().unwrap();
        let a = out_dir.path().join("a.ulanziDeckProfile");
        let b = out_dir.path().join("b.ulanziDeckProfile");

        write_profile_archive(scratch.path(), &a).unwrap();
        write_profile_archive(scratch.path(), &b).unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }
}
