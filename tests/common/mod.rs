//! Common test utilities for the stamp pipeline.
//!
//! Provides stamp-image fixtures and helpers for reading generated
//! `.ulanziDeckProfile` archives back.
#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use zip::ZipArchive;

/// Writes a solid-color PNG of the given dimensions.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    img.save(path).unwrap();
}

/// Writes a library stamp `{index}.png` with a per-index color so every
/// stamp has distinct bytes (and therefore a distinct content hash).
pub fn write_stamp(dir: &Path, index: u32) -> PathBuf {
    let path = dir.join(format!("{index}.png"));
    let shade = u8::try_from((index * 17) % 256).unwrap();
    write_png(&path, 64, 64, [shade, 30, 140, 255]);
    path
}

/// Writes stamps for every index in `indices`.
pub fn write_stamps(dir: &Path, indices: impl IntoIterator<Item = u32>) {
    for index in indices {
        write_stamp(dir, index);
    }
}

/// Opens the zip portion of a profile archive, asserting the sentinel
/// header first.
pub fn open_profile_zip(path: &Path) -> ZipArchive<Cursor<Vec<u8>>> {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.len() > 12, "archive shorter than its header");
    assert_eq!(&bytes[..12], b"#Version: 2\n");
    ZipArchive::new(Cursor::new(bytes[12..].to_vec())).unwrap()
}

/// Reads one entry of an open archive to a string.
pub fn read_entry_string(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut contents = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
}

/// Reads one entry of an open archive to bytes.
pub fn read_entry_bytes(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut contents = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut contents)
        .unwrap();
    contents
}

/// Finds the page manifest entry name (`.../Profiles/{page}/manifest.json`).
pub fn page_manifest_name(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> String {
    entry_names(archive)
        .into_iter()
        .find(|n| n.contains("/Profiles/") && n.ends_with("/manifest.json"))
        .expect("page manifest present")
}

/// Finds the root manifest entry name (`{uuid}.ulanziProfile/manifest.json`).
pub fn root_manifest_name(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> String {
    entry_names(archive)
        .into_iter()
        .find(|n| !n.contains("/Profiles/") && n.ends_with("/manifest.json"))
        .expect("root manifest present")
}

/// All entry names in the archive.
pub fn entry_names(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}
